//! Events the backend worker sends back to the UI thread.

use client_core::RequestError;
use shared::protocol::PredictionResult;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    PredictionSettled(Result<PredictionResult, RequestError>),
    BackendFailed(String),
}
