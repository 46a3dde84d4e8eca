use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod routes;
mod ui;
mod widgets;

use anyhow::Context;
use clap::Parser;
use client_core::{DashboardApi, HttpApiClient};
use crossbeam_channel::bounded;
use storage::{JsonFileStore, ProfileStore};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use crate::config::{load_settings, Args};
use crate::controller::events::UiEvent;
use crate::routes::Route;
use crate::ui::DashboardApp;

const APP_TITLE: &str = "Festa Dashboard";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let loaded = load_settings(&args, |name| std::env::var(name).ok());
    let settings = loaded.settings;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let data_dir = settings.resolve_data_dir()?;
    let store = JsonFileStore::in_dir(&data_dir)
        .with_context(|| format!("failed to open local storage in '{}'", data_dir.display()))?;
    tracing::info!(path = %store.path().display(), "local storage ready");

    let api: Arc<dyn DashboardApi> = Arc::new(
        HttpApiClient::new(&settings.api_base_url, settings.request_timeout())
            .context("failed to build api client")?,
    );
    tracing::info!(
        api_base_url = %settings.api_base_url,
        page_size = settings.festival_page_size,
        "starting dashboard"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    spawn_backend_thread(api, cmd_rx, ui_tx)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    let page_size = settings.festival_page_size;
    let start = Route::from_path(&args.start_path);
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DashboardApp::new(
                cmd_tx,
                ui_rx,
                ProfileStore::new(store),
                page_size,
                start,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("dashboard window failed: {err}"))
}
