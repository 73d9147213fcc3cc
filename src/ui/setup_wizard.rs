//! First-run setup wizard for configuration.

use std::path::PathBuf;
use std::sync::mpsc;

use eframe::egui::{self, Color32, RichText};

use super::wizard_nav;
use crate::config::{AppConfig, LOG_LEVELS};
use crate::service::{HttpParishService, ParishService};
use crate::wizard::{NavAction, WizardNav, WizardStep};

/// Connection test state.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ConnectionTestState {
    #[default]
    NotTested,
    Testing,
    Success,
    Failed(String),
}

const WELCOME_STEP: usize = 0;
const SERVER_STEP: usize = 1;
const PREFERENCES_STEP: usize = 2;
const CONFIRM_STEP: usize = 3;

/// Setup wizard state.
pub struct SetupWizard {
    steps: Vec<WizardStep>,
    /// Current step (0-3).
    pub current_step: usize,
    /// Configuration being built.
    pub config: AppConfig,
    /// Server connection test state.
    pub server_test_state: ConnectionTestState,
    /// Server fields changed while a test was running.
    stale_test: bool,
    /// Wizard completed flag.
    pub completed: bool,
    /// Timeout input as string for text editing.
    timeout_input: String,
    /// Toast duration input as string.
    toast_input: String,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    pub fn new() -> Self {
        let config = AppConfig::default();
        Self {
            steps: vec![
                WizardStep::new(1, "Welcome", "What you need before starting"),
                WizardStep::new(2, "Server", "Parish web app address and token"),
                WizardStep::new(3, "Preferences", "Notifications and logging"),
                WizardStep::new(4, "Confirmation", "Review and save"),
            ],
            current_step: WELCOME_STEP,
            timeout_input: config.server.timeout_secs.to_string(),
            toast_input: config.ui.toast_seconds.to_string(),
            config,
            server_test_state: ConnectionTestState::NotTested,
            stale_test: false,
            completed: false,
        }
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    /// Check if user can proceed to next step.
    pub fn can_proceed(&self) -> bool {
        match self.current_step {
            WELCOME_STEP => true,
            SERVER_STEP => matches!(self.server_test_state, ConnectionTestState::Success),
            PREFERENCES_STEP => self.config.validate().is_ok(),
            CONFIRM_STEP => true,
            _ => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step > WELCOME_STEP && self.server_test_state != ConnectionTestState::Testing
    }

    fn next_label(&self) -> &'static str {
        match self.current_step {
            WELCOME_STEP => "Get Started",
            CONFIRM_STEP => "Save & Exit",
            _ => "Next",
        }
    }

    pub fn navigate(&mut self, action: NavAction) {
        match action {
            NavAction::Next if self.can_proceed() => {
                if self.current_step == CONFIRM_STEP {
                    self.completed = true;
                } else {
                    self.current_step += 1;
                }
            }
            NavAction::Previous if self.can_go_back() => self.current_step -= 1,
            NavAction::JumpTo(index) if index < self.current_step && self.can_go_back() => self.current_step = index,
            _ => {}
        }
    }

    /// The server settings changed; any earlier or running test no longer applies.
    pub fn server_edited(&mut self) {
        if self.server_test_state == ConnectionTestState::Testing {
            self.stale_test = true;
        } else {
            self.server_test_state = ConnectionTestState::NotTested;
        }
    }

    pub fn begin_test(&mut self) {
        self.stale_test = false;
        self.server_test_state = ConnectionTestState::Testing;
    }

    /// Record a finished connection test. Results for settings edited
    /// mid-test are discarded.
    pub fn finish_test(&mut self, result: Result<(), String>) {
        self.server_test_state = match result {
            _ if self.stale_test => ConnectionTestState::NotTested,
            Ok(()) => ConnectionTestState::Success,
            Err(e) => {
                tracing::warn!("Server test failed: {}", e);
                ConnectionTestState::Failed(e)
            }
        };
        self.stale_test = false;
    }
}

/// Setup wizard application.
pub struct SetupApp {
    pub wizard: SetupWizard,
    pub initial_error: Option<String>,
    pub rt: tokio::runtime::Runtime,
    config_path: PathBuf,
    server_test_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl SetupApp {
    pub fn new(
        wizard: SetupWizard,
        initial_error: Option<String>,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
    ) -> Self {
        Self {
            wizard,
            initial_error,
            rt,
            config_path,
            server_test_rx: None,
        }
    }

    /// Test the server connection asynchronously.
    fn start_server_test(&mut self) {
        let server = self.wizard.config.server.clone();
        let (tx, rx) = mpsc::channel();
        self.server_test_rx = Some(rx);
        self.wizard.begin_test();

        self.rt.spawn(async move {
            let result = match HttpParishService::new(&server) {
                Ok(service) => service.ping().await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for async test results.
    fn poll_test_results(&mut self) {
        if let Some(rx) = &self.server_test_rx
            && let Ok(result) = rx.try_recv()
        {
            self.wizard.finish_test(result);
            self.server_test_rx = None;
        }
    }
}

impl eframe::App for SetupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async test results
        self.poll_test_results();

        // Request repaint while testing
        if matches!(self.wizard.server_test_state, ConnectionTestState::Testing) {
            ctx.request_repaint();
        }

        // Show initial error dialog
        if let Some(err) = self.initial_error.clone() {
            egui::Window::new("Configuration Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(Color32::from_rgb(255, 100, 100), &err);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.initial_error = None;
                    }
                });
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading(RichText::new("Parish Admin Setup").size(24.0).strong());
            ui.add_space(10.0);

            let nav = WizardNav::new(self.wizard.steps(), self.wizard.current_step)
                .can_proceed(self.wizard.can_proceed())
                .can_go_back(self.wizard.can_go_back())
                .next_label(self.wizard.next_label())
                .previous_label("Back");
            if let Some(action) = wizard_nav::show(ui, &nav) {
                self.wizard.navigate(action);
            }

            ui.add_space(20.0);

            let needs_server_test = match self.wizard.current_step {
                WELCOME_STEP => {
                    show_welcome_step(ui);
                    false
                }
                SERVER_STEP => show_server_step(ui, &mut self.wizard),
                PREFERENCES_STEP => {
                    show_preferences_step(ui, &mut self.wizard);
                    false
                }
                _ => {
                    show_confirmation_step(ui, &self.wizard, &self.config_path);
                    false
                }
            };

            if needs_server_test {
                self.start_server_test();
            }
        });

        // Handle completion
        if self.wizard.completed {
            match self.wizard.config.save(&self.config_path) {
                Ok(()) => {
                    tracing::info!("Config saved to {:?}", self.config_path);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Err(e) => {
                    self.initial_error = Some(format!("Failed to save config: {}", e));
                    self.wizard.completed = false;
                }
            }
        }
    }
}

fn show_welcome_step(ui: &mut egui::Ui) {
    ui.label("Welcome to Parish Admin!");
    ui.add_space(10.0);
    ui.label("This wizard will help you connect to your parish web app.");
    ui.add_space(20.0);
    ui.label("You will need:");
    ui.add_space(5.0);
    ui.label("  - The address of the parish web app");
    ui.label("  - An API token (optional, if your server requires one)");
}

fn show_server_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) -> bool {
    let mut needs_test = false;
    let mut edited = false;
    let testing = matches!(wizard.server_test_state, ConnectionTestState::Testing);

    // Fields are locked while a test is running
    ui.add_enabled_ui(!testing, |ui| {
        egui::Grid::new("server_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label("Server URL:");
                edited |= ui
                    .add(
                        egui::TextEdit::singleline(&mut wizard.config.server.base_url)
                            .hint_text("https://parish.example.org"),
                    )
                    .changed();
                ui.end_row();

                ui.label("API token:");
                edited |= ui
                    .add(egui::TextEdit::singleline(&mut wizard.config.server.api_token).password(true))
                    .changed();
                ui.end_row();

                ui.label("Timeout (seconds):");
                if ui.text_edit_singleline(&mut wizard.timeout_input).changed()
                    && let Ok(t) = wizard.timeout_input.parse()
                {
                    wizard.config.server.timeout_secs = t;
                    edited = true;
                }
                ui.end_row();
            });
    });

    if edited {
        wizard.server_edited();
    }

    ui.add_space(20.0);

    ui.horizontal(|ui| {
        if ui.add_enabled(!testing, egui::Button::new("Test Connection")).clicked() {
            needs_test = true;
        }

        ui.add_space(10.0);

        match &wizard.server_test_state {
            ConnectionTestState::NotTested => {
                ui.label("Not tested");
            }
            ConnectionTestState::Testing => {
                ui.spinner();
                ui.label("Testing...");
            }
            ConnectionTestState::Success => {
                ui.colored_label(Color32::from_rgb(100, 200, 100), "Connection successful!");
            }
            ConnectionTestState::Failed(e) => {
                ui.colored_label(Color32::from_rgb(255, 100, 100), format!("Failed: {}", e));
            }
        }
    });

    needs_test
}

fn show_preferences_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) {
    egui::Grid::new("preferences_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Notification duration (seconds):");
            if ui.text_edit_singleline(&mut wizard.toast_input).changed()
                && let Ok(s) = wizard.toast_input.parse()
            {
                wizard.config.ui.toast_seconds = s;
            }
            ui.end_row();

            ui.label("Log level:");
            egui::ComboBox::from_id_salt("log_level")
                .selected_text(wizard.config.logging.level.as_str())
                .show_ui(ui, |ui| {
                    for level in LOG_LEVELS {
                        ui.selectable_value(&mut wizard.config.logging.level, level.to_string(), level);
                    }
                });
            ui.end_row();

            ui.label("Log file:");
            ui.checkbox(&mut wizard.config.logging.file, "Write a daily log file");
            ui.end_row();
        });

    // Validation feedback
    if let Err(e) = wizard.config.validate() {
        ui.add_space(10.0);
        ui.colored_label(Color32::from_rgb(255, 100, 100), e.to_string());
    }
}

fn show_confirmation_step(ui: &mut egui::Ui, wizard: &SetupWizard, path: &std::path::Path) {
    ui.label("Review your configuration:");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Server");
        ui.label(format!("  {}", wizard.config.server.base()));
        ui.label(format!(
            "  API token: {}",
            if wizard.config.server.api_token.is_empty() {
                "Not set"
            } else {
                "Set"
            }
        ));
        ui.label(format!("  Timeout: {} seconds", wizard.config.server.timeout_secs));
    });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Preferences");
        ui.label(format!("  Notifications: {} seconds", wizard.config.ui.toast_seconds));
        ui.label(format!("  Log level: {}", wizard.config.logging.level));
        ui.label(format!(
            "  Log file: {}",
            if wizard.config.logging.file { "Enabled" } else { "Disabled" }
        ));
    });

    ui.add_space(20.0);
    ui.label(format!("Configuration will be saved to {}", path.display()));
    ui.label("You will need to restart the application after setup.");
}
