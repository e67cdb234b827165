//! Events flowing from the fetch worker back into the UI thread.

use shared::domain::FetchOutcome;

use crate::ui::app::PortraitImage;

pub enum UiEvent {
    Info(String),
    FetchResolved(FetchOutcome),
    PortraitLoaded { url: String, image: PortraitImage },
    PortraitFailed { url: String, reason: String },
}
