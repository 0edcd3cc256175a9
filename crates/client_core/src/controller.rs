//! Form controller: owns the form input and the render-determining status.

use shared::protocol::{PredictionRequest, PredictionResult};
use tracing::{info, warn};

use crate::{
    error::{FormFieldError, RequestError},
    form::{FormField, FormInput},
    PredictionService,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiStatus {
    #[default]
    Idle,
    Loading,
    Success(PredictionResult),
    Failure(String),
}

impl UiStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiStatus::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            UiStatus::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            UiStatus::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Status after a request settles. Loading is always cleared and the
    /// outcome always applies, even if the form was reset in the meantime.
    pub fn settle(self, outcome: Result<PredictionResult, RequestError>) -> UiStatus {
        if !self.is_loading() {
            info!(previous = ?self, "applying prediction outcome to a status that is no longer loading");
        }
        match outcome {
            Ok(result) => {
                info!(models = result.len(), "prediction succeeded");
                UiStatus::Success(result)
            }
            Err(err) => {
                warn!(error = %err, "prediction request failed");
                UiStatus::Failure(err.user_message().to_string())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct PredictionFormController {
    form: FormInput,
    status: UiStatus,
}

impl PredictionFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn status(&self) -> &UiStatus {
        &self.status
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn update_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormFieldError> {
        let field = name.parse::<FormField>()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Validates the form and, if a model is selected, enters `Loading` and
    /// returns the request to send. On validation failure the status becomes
    /// `Failure` and nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<PredictionRequest> {
        match self.form.to_request() {
            Ok(request) => {
                info!(model = %request.model, date = %request.date, "submitting prediction request");
                self.status = UiStatus::Loading;
                Some(request)
            }
            Err(err) => {
                info!(error = %err, "prediction form rejected before sending");
                self.status = UiStatus::Failure(err.user_message().to_string());
                None
            }
        }
    }

    pub fn settle(&mut self, outcome: Result<PredictionResult, RequestError>) {
        let previous = std::mem::take(&mut self.status);
        self.status = previous.settle(outcome);
    }

    /// Runs one full submission against `service`.
    pub async fn submit<S>(&mut self, service: &S) -> &UiStatus
    where
        S: PredictionService + ?Sized,
    {
        if let Some(request) = self.begin_submit() {
            let outcome = service.predict(&request).await;
            self.settle(outcome);
        }
        &self.status
    }

    pub fn reset(&mut self) {
        self.form = FormInput::default();
        self.status = UiStatus::Idle;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
