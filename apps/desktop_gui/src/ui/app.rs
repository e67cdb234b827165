use std::thread;

use client_core::{RandomUserClient, ThreadRngClassifier};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::FetchOutcome;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{render_plan, BodyContent, ViewPhase, ViewState};

/// Portrait edge length in points, matching the widget's published layout.
const PORTRAIT_SIZE: f32 = 200.0;

/// Decoded RGBA portrait, produced on the worker thread so the UI thread
/// only uploads the texture.
#[derive(Clone)]
pub struct PortraitImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

enum PortraitState {
    NotRequested,
    Loading,
    Ready {
        image: PortraitImage,
        texture: Option<egui::TextureHandle>,
    },
    Failed(String),
}

pub struct RandomPersonApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewState,
    portrait: PortraitState,
    status: String,
}

impl RandomPersonApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ViewState::idle(),
            portrait: PortraitState::NotRequested,
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::FetchResolved(outcome) => {
                    // Later resolutions simply overwrite earlier ones; there
                    // is no request identity to compare against.
                    self.view = self.view.resolve(outcome);
                }
                UiEvent::PortraitLoaded { url, image } => {
                    if self.portrait_url() == Some(url.as_str()) {
                        self.portrait = PortraitState::Ready {
                            image,
                            texture: None,
                        };
                    }
                }
                UiEvent::PortraitFailed { url, reason } => {
                    tracing::warn!(url, "portrait load failed: {reason}");
                    if self.portrait_url() == Some(url.as_str()) {
                        self.portrait = PortraitState::Failed(reason);
                    }
                }
            }
        }
    }

    fn portrait_url(&self) -> Option<&str> {
        self.view
            .record
            .as_ref()
            .and_then(|record| record.picture_url.as_deref())
    }

    fn on_trigger(&mut self) {
        let Some(next) = self.view.trigger() else {
            return;
        };
        self.view = next;
        self.portrait = PortraitState::NotRequested;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchRandomUser,
            &mut self.status,
        );
    }

    fn show_portrait(&mut self, ui: &mut egui::Ui, full_name: &str, picture_url: Option<&str>) {
        let Some(url) = picture_url else {
            Self::show_portrait_placeholder(ui, full_name);
            return;
        };

        if matches!(self.portrait, PortraitState::NotRequested) {
            self.portrait = PortraitState::Loading;
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchPortrait {
                    url: url.to_string(),
                },
                &mut self.status,
            );
        }

        match &mut self.portrait {
            PortraitState::NotRequested => {}
            PortraitState::Loading => {
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(PORTRAIT_SIZE, PORTRAIT_SIZE),
                    egui::Sense::hover(),
                );
                ui.painter()
                    .rect_filled(rect, egui::CornerRadius::same(4), ui.visuals().faint_bg_color);
                ui.put(rect, egui::Spinner::new());
            }
            PortraitState::Ready { image, texture } => {
                if texture.is_none() {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    *texture = Some(ui.ctx().load_texture(
                        format!("portrait:{url}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                if let Some(texture) = texture.as_ref() {
                    ui.add(
                        egui::Image::new((
                            texture.id(),
                            egui::vec2(PORTRAIT_SIZE, PORTRAIT_SIZE),
                        ))
                        .fit_to_exact_size(egui::vec2(PORTRAIT_SIZE, PORTRAIT_SIZE)),
                    )
                    .on_hover_text(full_name);
                }
            }
            PortraitState::Failed(_) => {
                Self::show_portrait_placeholder(ui, full_name);
            }
        }
    }

    /// Flat rect standing in for the portrait, same footprint as the image.
    fn show_portrait_placeholder(ui: &mut egui::Ui, full_name: &str) {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(PORTRAIT_SIZE, PORTRAIT_SIZE),
            egui::Sense::hover(),
        );
        ui.painter()
            .rect_filled(rect, egui::CornerRadius::same(4), ui.visuals().faint_bg_color);
        response.on_hover_text(full_name.to_string());
    }
}

impl eframe::App for RandomPersonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let plan = render_plan(&self.view);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                let button = egui::Button::new(plan.button_label);
                if ui.add_enabled(plan.button_enabled, button).clicked() {
                    self.on_trigger();
                }
                ui.add_space(8.0);

                match &plan.body {
                    BodyContent::None => {}
                    BodyContent::Message(message) => {
                        ui.label(*message);
                    }
                    BodyContent::Person {
                        email,
                        full_name,
                        picture_url,
                    } => {
                        self.show_portrait(ui, full_name, picture_url.as_deref());
                        ui.label(email);
                    }
                }

                if !self.status.is_empty() {
                    ui.add_space(12.0);
                    ui.weak(&self.status);
                }
            });
        });

        // Keep polling the event channel while work is pending.
        let busy = self.view.phase == ViewPhase::Loading
            || matches!(self.portrait, PortraitState::Loading);
        if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}

fn decode_portrait_image(bytes: &[u8]) -> Result<PortraitImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let rgba = dynamic.to_rgba8();
    let [width, height] = [rgba.width() as usize, rgba.height() as usize];
    Ok(PortraitImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

pub fn start_backend_bridge(
    api_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build fetch worker runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "Fetch worker failed to start: {err}"
                )));
                let _ = ui_tx.try_send(UiEvent::FetchResolved(FetchOutcome::Failed(-1)));
                return;
            }
        };

        runtime.block_on(async move {
            let client = RandomUserClient::new(api_url, ThreadRngClassifier);
            tracing::debug!(api_url = client.api_url(), "fetch worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchRandomUser => {
                        let outcome = client.fetch_random_user().await;
                        let _ = ui_tx.try_send(UiEvent::FetchResolved(outcome));
                    }
                    BackendCommand::FetchPortrait { url } => match client.fetch_portrait(&url).await
                    {
                        Ok(bytes) => match decode_portrait_image(&bytes) {
                            Ok(image) => {
                                let _ = ui_tx.try_send(UiEvent::PortraitLoaded { url, image });
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::PortraitFailed {
                                    url,
                                    reason: format!("decode failed: {err}"),
                                });
                            }
                        },
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::PortraitFailed {
                                url,
                                reason: err.to_string(),
                            });
                        }
                    },
                }
            }
        });
    });
}
