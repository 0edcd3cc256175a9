//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientSettings, HttpPredictionService, PredictionService, RequestError};
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::PredictionResult;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the backend worker thread. Each prediction runs as its own task, so
/// several may be in flight; their outcomes arrive in completion order.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };

        let service = match HttpPredictionService::from_settings(&settings) {
            Ok(service) => Arc::new(service),
            Err(err) => {
                tracing::error!(service_url = %settings.service_url, "failed to set up prediction client: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Prediction service: {}",
            service.endpoint()
        )));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict { request } => {
                        tracing::info!(model = %request.model, date = %request.date, "backend: predict");
                        let service = Arc::clone(&service);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = service.predict(&request).await;
                            if !deliver_outcome(ui_tx, outcome).await {
                                tracing::error!(model = %request.model, "backend: dropped prediction outcome; ui queue closed");
                            }
                        });
                    }
                }
            }
            tracing::info!("backend: command queue closed, worker exiting");
        });
    });
}

/// Hands a settled prediction to the UI, waiting for queue room instead of
/// dropping it. Returns false only once the UI side has gone away.
async fn deliver_outcome(
    ui_tx: Sender<UiEvent>,
    outcome: Result<PredictionResult, RequestError>,
) -> bool {
    let sent = tokio::task::spawn_blocking(move || {
        ui_tx.send(UiEvent::PredictionSettled(outcome)).is_ok()
    })
    .await;
    matches!(sent, Ok(true))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::bounded;

    use super::*;

    fn unavailable() -> Result<PredictionResult, RequestError> {
        Err(RequestError::BackendUnavailable("test".to_string()))
    }

    #[tokio::test]
    async fn outcome_waits_for_room_in_a_full_ui_queue() {
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .send(UiEvent::Info("busy".to_string()))
            .expect("fill queue");

        let delivery = tokio::spawn(deliver_outcome(ui_tx, unavailable()));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!delivery.is_finished());

        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Info(_))));
        assert!(delivery.await.expect("join"));
        assert!(matches!(
            ui_rx.try_recv(),
            Ok(UiEvent::PredictionSettled(Err(_)))
        ));
    }

    #[tokio::test]
    async fn closed_ui_queue_reports_undelivered() {
        let (ui_tx, ui_rx) = bounded::<UiEvent>(1);
        drop(ui_rx);
        assert!(!deliver_outcome(ui_tx, unavailable()).await);
    }
}
