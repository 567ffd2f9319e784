#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use anyhow::{anyhow, Context};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use staff_timeline::config::PlannerSettings;
use staff_timeline::io::JsonFileStore;

const LOG_ENV: &str = "STAFF_TIMELINE_LOG";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Filter for the configured log level, or the default one if it does not parse.
fn configured_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        warn!(level, "invalid log level in settings: {e}");
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    })
}

fn main() -> anyhow::Result<()> {
    // Subscriber first so that settings loading can log; the configured level is applied after
    let env_filter = EnvFilter::try_from_env(LOG_ENV).ok();
    let from_env = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let settings = PlannerSettings::load();
    if !from_env {
        if let Err(e) = filter_handle.reload(configured_filter(&settings.log_level)) {
            warn!("could not apply log level: {e}");
        }
    }

    let today = chrono::Local::now().date_naive();
    let data_path = settings.data_path()?;
    let store = JsonFileStore::open(&data_path, today)
        .with_context(|| format!("opening {}", data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 800.0])
            .with_min_inner_size([900.0, 420.0])
            .with_title("Staff Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Staff Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(app::PlannerApp::new(cc, settings, store, today)))),
    )
    .map_err(|e| anyhow!("event loop failed: {e}"))
}
