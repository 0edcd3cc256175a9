//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{PredictionFormController, RequestError};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Validates the form and queues the prediction. A rejected form or a dead
/// queue ends the submission right away.
pub fn submit_form(cmd_tx: &Sender<BackendCommand>, controller: &mut PredictionFormController) {
    if let Some(request) = controller.begin_submit() {
        dispatch_backend_command(cmd_tx, BackendCommand::Predict { request }, controller);
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    controller: &mut PredictionFormController,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            controller.settle(Err(RequestError::BackendUnavailable(
                "UI command queue is full".to_string(),
            )));
        }
        Err(TrySendError::Disconnected(_)) => {
            controller.settle(Err(RequestError::BackendUnavailable(
                "backend command processor disconnected".to_string(),
            )));
        }
    }
}
