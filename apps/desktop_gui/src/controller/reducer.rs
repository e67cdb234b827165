//! View-state machine for the random-person widget.
//!
//! The whole widget is driven by one `ViewState` value owned by the app
//! shell. Transitions replace the value instead of mutating fields in place,
//! so the invariant (record iff Success, error code iff Failed) holds by
//! construction. Rendering is a pure mapping from `ViewState` to a
//! `RenderPlan`; no egui types leak in here.

use shared::domain::{FetchOutcome, UserRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Success,
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub phase: ViewPhase,
    pub record: Option<UserRecord>,
    pub error_code: Option<i32>,
}

impl ViewState {
    pub fn idle() -> Self {
        Self {
            phase: ViewPhase::Idle,
            record: None,
            error_code: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            phase: ViewPhase::Loading,
            record: None,
            error_code: None,
        }
    }

    pub fn from_outcome(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success(record) => Self {
                phase: ViewPhase::Success,
                record: Some(record),
                error_code: None,
            },
            FetchOutcome::Empty => Self {
                phase: ViewPhase::Empty,
                record: None,
                error_code: None,
            },
            FetchOutcome::Failed(code) => Self {
                phase: ViewPhase::Failed,
                record: None,
                error_code: Some(code),
            },
        }
    }

    /// The trigger is refused while a fetch is in flight; the button is
    /// disabled for the same reason, this is the backstop.
    pub fn can_trigger(&self) -> bool {
        self.phase != ViewPhase::Loading
    }

    /// Applies the user trigger. Synchronous: the Loading state is visible
    /// before any network work starts. Returns `None` when the trigger is
    /// refused.
    pub fn trigger(&self) -> Option<Self> {
        self.can_trigger().then(Self::loading)
    }

    /// Applies a resolved fetch. There is no request identity: if two
    /// fetches overlap, whichever resolves later wins.
    pub fn resolve(&self, outcome: FetchOutcome) -> Self {
        Self::from_outcome(outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyContent {
    None,
    Message(&'static str),
    Person {
        email: String,
        full_name: String,
        picture_url: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub body: BodyContent,
}

pub const LABEL_IDLE: &str = "Get a random person";
pub const LABEL_LOADING: &str = "Loading";
pub const LABEL_AGAIN: &str = "Get another one";
pub const LABEL_RETRY: &str = "Try again";
pub const MSG_EMPTY: &str = "No result was received";
// Spelling kept as-is; it is the widget's published copy.
pub const MSG_ERROR: &str = "An error occured";

pub fn render_plan(state: &ViewState) -> RenderPlan {
    match state.phase {
        ViewPhase::Idle => RenderPlan {
            button_label: LABEL_IDLE,
            button_enabled: true,
            body: BodyContent::None,
        },
        ViewPhase::Loading => RenderPlan {
            button_label: LABEL_LOADING,
            button_enabled: false,
            body: BodyContent::None,
        },
        ViewPhase::Success => {
            let body = match &state.record {
                Some(record) => BodyContent::Person {
                    email: record.email.clone(),
                    full_name: record.full_name(),
                    picture_url: record.picture_url.clone(),
                },
                // Unreachable through the constructors; render the empty copy
                // rather than panicking in the frame loop.
                None => BodyContent::Message(MSG_EMPTY),
            };
            RenderPlan {
                button_label: LABEL_AGAIN,
                button_enabled: true,
                body,
            }
        }
        ViewPhase::Empty => RenderPlan {
            button_label: LABEL_AGAIN,
            button_enabled: true,
            body: BodyContent::Message(MSG_EMPTY),
        },
        ViewPhase::Failed => RenderPlan {
            button_label: LABEL_RETRY,
            button_enabled: true,
            body: BodyContent::Message(MSG_ERROR),
        },
    }
}
