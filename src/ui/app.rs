//! Main application UI.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Align, Layout};

use crate::config::AppConfig;
use crate::feedback::Notices;
use crate::parish_settings::ParishSettings;
use crate::service::ParishService;
use crate::wizard::PetitionWizard;

use super::components::{colors, toasts};
use super::{dashboard, parish_panel, petition_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    ParishSettings,
    NewPetition,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::ParishSettings => "Parish Settings",
            Panel::NewPetition => "New Petition",
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime for service calls; controllers hold a handle to it
    pub rt: tokio::runtime::Runtime,

    // Navigation
    pub current_panel: Panel,

    // Controllers
    pub settings: ParishSettings,
    pub wizard: PetitionWizard,

    // Toasts gathered from every controller
    pub notices: Notices,

    // Configuration
    pub config: AppConfig,
}

impl App {
    pub fn new(service: Arc<dyn ParishService>, config: AppConfig, rt: tokio::runtime::Runtime) -> Self {
        let handle = rt.handle().clone();
        let mut app = Self {
            settings: ParishSettings::new(service.clone(), handle.clone()),
            wizard: PetitionWizard::new(service, handle),
            rt,
            current_panel: Panel::default(),
            notices: Notices::default(),
            config,
        };

        // The dashboard shows the parish name
        app.settings.load();

        app
    }

    /// Switch panels, loading whatever the target needs.
    pub fn open(&mut self, panel: Panel) {
        if panel == Panel::ParishSettings && panel != self.current_panel {
            self.settings.load();
        }
        tracing::debug!("Opening panel: {}", panel.name());
        self.current_panel = panel;
    }

    /// Drain controller results and collect their notices.
    fn poll_async_results(&mut self) {
        self.settings.poll();
        self.wizard.poll();

        self.notices.absorb(&mut self.settings.notices);
        self.notices.absorb(&mut self.wizard.notices);

        let ttl = Duration::from_secs(self.config.ui.toast_seconds);
        self.notices.expire(ttl);
    }

    fn busy(&self) -> bool {
        self.settings.in_flight() > 0 || self.wizard.in_flight() > 0
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Dashboard").clicked() {
                        self.open(Panel::Dashboard);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });
                ui.menu_button("Parish", |ui| {
                    let loading = self.settings.loading;
                    if ui.add_enabled(!loading, egui::Button::new("Refresh")).clicked() {
                        self.settings.load();
                        ui.close();
                    }
                    if ui.button("Settings").clicked() {
                        self.open(Panel::ParishSettings);
                        ui.close();
                    }
                    if ui.button("New Petition").clicked() {
                        self.open(Panel::NewPetition);
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.colored_label(colors::NEUTRAL, format!("Server: {}", self.config.server.base()));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.busy() {
                            ui.label("Working...");
                            ui.spinner();
                        } else if let Some(parish) = &self.settings.parish {
                            ui.colored_label(colors::SUCCESS, parish.name.as_str());
                        }
                    });
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Keep polling while requests are out; otherwise wake up to expire toasts
        if self.busy() {
            ctx.request_repaint();
        } else if !self.notices.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => {
                if let Some(next) = dashboard::show(self, ui) {
                    self.open(next);
                }
            }
            Panel::ParishSettings => {
                if parish_panel::show(&mut self.settings, ui) {
                    self.open(Panel::Dashboard);
                }
            }
            Panel::NewPetition => {
                if petition_panel::show(self, ui) {
                    self.open(Panel::Dashboard);
                }
            }
        });

        toasts(ctx, &mut self.notices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake::{FakeParishService, sample_parish};

    fn app(fake: &Arc<FakeParishService>) -> App {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        App::new(fake.clone(), AppConfig::default(), rt)
    }

    fn settle(app: &mut App) {
        let App { rt, settings, .. } = app;
        rt.block_on(async {
            while settings.in_flight() > 0 {
                settings.next_message().await;
            }
        });
    }

    #[test]
    fn test_startup_loads_parish() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut app = app(&fake);
        settle(&mut app);

        assert_eq!(app.settings.parish.as_ref().unwrap().name, "St. Mary's Catholic Church");
        assert_eq!(fake.calls.lock().unwrap().current_parish, 1);
    }

    #[test]
    fn test_opening_settings_reloads() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut app = app(&fake);
        settle(&mut app);

        app.open(Panel::ParishSettings);
        settle(&mut app);
        // Re-selecting the current panel does not reload
        app.open(Panel::ParishSettings);
        settle(&mut app);

        assert_eq!(app.current_panel, Panel::ParishSettings);
        assert_eq!(fake.calls.lock().unwrap().current_parish, 2);
    }

    #[test]
    fn test_controller_notices_are_collected() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        fake.fail("current_parish");
        let mut app = app(&fake);
        settle(&mut app);

        app.poll_async_results();
        assert!(app.settings.notices.is_empty());
        assert_eq!(app.notices.last().unwrap().message, "Failed to load parish data");
    }
}
