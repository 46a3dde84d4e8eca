//! Worker thread hosting the tokio runtime that serves UI commands.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{load_festivals_or_empty, load_home_field, DashboardApi};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Commands are served concurrently; the thread exits once every command
/// sender is dropped.
pub fn spawn_backend_thread(
    api: Arc<dyn DashboardApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("dashboard-backend".into())
        .spawn(move || run_backend(api, cmd_rx, ui_tx))
        .context("failed to spawn backend worker thread")
}

fn run_backend(api: Arc<dyn DashboardApi>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to build backend runtime: {err}");
            let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                "backend worker startup failure: {err}"
            )));
            return;
        }
    };
    tracing::info!("backend worker ready");

    while let Ok(cmd) = cmd_rx.recv() {
        let api = Arc::clone(&api);
        let ui_tx = ui_tx.clone();
        runtime.spawn(async move {
            let event = handle_command(api.as_ref(), cmd).await;
            deliver(&ui_tx, event);
        });
    }

    tracing::info!("backend command queue closed; shutting down worker");
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
}

/// Never blocks a runtime worker; a full or closed UI queue drops the event.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event)) => {
            tracing::debug!(?event, "ui event queue is full; dropping backend event");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui receiver dropped; discarding backend event");
            false
        }
    }
}

pub async fn handle_command(api: &dyn DashboardApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadFestivals {
            generation,
            num_of_rows,
        } => UiEvent::FestivalsLoaded {
            generation,
            records: load_festivals_or_empty(api, num_of_rows).await,
        },
        BackendCommand::LoadHomeField { generation, field } => UiEvent::HomeFieldLoaded {
            generation,
            field,
            text: load_home_field(api, field).await,
        },
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
