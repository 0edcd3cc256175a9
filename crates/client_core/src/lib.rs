use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use shared::{
    error::ServiceErrorBody,
    protocol::{PredictionRequest, PredictionResult, PREDICTION_PATH},
};
use tracing::debug;

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod render;

pub use config::ClientSettings;
pub use controller::{PredictionFormController, UiStatus};
pub use error::{RequestError, ValidationError, MISSING_MODEL_MESSAGE, REQUEST_FAILED_MESSAGE};
pub use form::{FormField, FormInput, MIN_YEAR};

/// The remote service that turns a model name and date into predictions.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictionRequest)
        -> Result<PredictionResult, RequestError>;
}

/// Resolves the prediction endpoint under `service_url`, keeping any base path.
pub fn prediction_endpoint(service_url: &str) -> Result<Url, RequestError> {
    let invalid = |source: url::ParseError| RequestError::InvalidEndpoint {
        url: service_url.to_string(),
        source,
    };
    let mut base = Url::parse(service_url.trim()).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREDICTION_PATH).map_err(invalid)
}

pub struct HttpPredictionService {
    http: Client,
    endpoint: Url,
}

impl HttpPredictionService {
    pub fn new(service_url: &str) -> Result<Self, RequestError> {
        Self::with_client(Client::new(), service_url)
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, RequestError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Self::with_client(http, &settings.service_url)
    }

    pub fn with_client(http: Client, service_url: &str) -> Result<Self, RequestError> {
        Ok(Self {
            http,
            endpoint: prediction_endpoint(service_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, RequestError> {
        debug!(endpoint = %self.endpoint, model = %request.model, "posting prediction request");
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = res.status();
        let body = res.bytes().await?;
        if !status.is_success() {
            return Err(RequestError::Status {
                status,
                detail: ServiceErrorBody::describe(&body),
            });
        }
        Ok(PredictionResult::from_slice(&body)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
