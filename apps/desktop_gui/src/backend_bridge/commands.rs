//! Backend commands queued from UI to backend worker.

use shared::protocol::PredictionRequest;

#[derive(Debug)]
pub enum BackendCommand {
    Predict { request: PredictionRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
        }
    }
}
