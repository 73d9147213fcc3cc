//! Parish Admin - desktop client for parish settings and petitions.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use parish_admin as app;

use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::service::HttpParishService;
use app::ui::{App, SetupApp, SetupWizard};

/// Desktop client for parish settings, membership and petitions.
#[derive(Parser)]
#[command(name = "parish-admin")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Load configuration from this file instead of the default location
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,
}

/// Application launch mode.
enum LaunchMode {
    /// Normal operation with valid config.
    Normal(AppConfig),
    /// Setup wizard for first run or invalid config.
    Setup(SetupWizard, Option<String>),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (cli.config, cli.dev) {
        (Some(path), _) => path,
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    let loaded = AppConfig::try_load(&config_path);
    let logging = match &loaded {
        ConfigLoadResult::Loaded(config) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    let _log_guard = app::logging::init(&logging);

    tracing::info!("Parish Admin starting...");
    if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
    }
    tracing::info!("Config path: {:?}", config_path);

    let launch_mode = match loaded {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            LaunchMode::Normal(config)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, starting setup wizard");
            LaunchMode::Setup(SetupWizard::new(), None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            LaunchMode::Setup(SetupWizard::new(), Some(e.to_string()))
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    match launch_mode {
        LaunchMode::Normal(config) => run_main_app(config, rt),
        LaunchMode::Setup(wizard, error) => run_setup_wizard(wizard, error, config_path, rt),
    }
}

fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

/// Run the setup wizard.
fn run_setup_wizard(
    wizard: SetupWizard,
    initial_error: Option<String>,
    config_path: PathBuf,
    rt: tokio::runtime::Runtime,
) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Parish Admin - Setup")
            .with_inner_size([640.0, 560.0])
            .with_min_inner_size([520.0, 420.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Parish Admin - Setup",
        options,
        Box::new(|cc| {
            install_fonts(&cc.egui_ctx);
            Ok(Box::new(SetupApp::new(wizard, initial_error, config_path, rt)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start setup window: {e}"))
}

/// Run the main application.
fn run_main_app(config: AppConfig, rt: tokio::runtime::Runtime) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Parish Admin")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 560.0]),
        ..Default::default()
    };

    let service = HttpParishService::new(&config.server).context("Failed to create HTTP client")?;
    tracing::info!("Parish API: {}", config.server.base());

    eframe::run_native(
        "Parish Admin",
        options,
        Box::new(|cc| {
            install_fonts(&cc.egui_ctx);
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(App::new(Arc::new(service), config, rt)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start main window: {e}"))
}
