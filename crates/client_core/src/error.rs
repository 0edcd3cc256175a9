//! Error types for the prediction form and its service calls.

use reqwest::StatusCode;
use shared::error::ProtocolError;
use thiserror::Error;

/// Shown when no model is selected.
pub const MISSING_MODEL_MESSAGE: &str = "Please select a model.";

/// Shown for every failed request, whatever went wrong underneath.
pub const REQUEST_FAILED_MESSAGE: &str = "Error predicting air quality. Please try again later.";

/// Local validation failure; the request is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", MISSING_MODEL_MESSAGE)]
    MissingModel,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingModel => MISSING_MODEL_MESSAGE,
        }
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid prediction service url '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },
    #[error("malformed prediction response: {0}")]
    MalformedResponse(#[from] ProtocolError),
    #[error("prediction backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl RequestError {
    /// The detail is for logs only; users always see the generic message.
    pub fn user_message(&self) -> &'static str {
        REQUEST_FAILED_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormFieldError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
}
