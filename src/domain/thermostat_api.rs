use crate::domain::credentials::{AccessToken, Credentials};
use crate::domain::device::Device;
use crate::domain::Snapshot;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// The three calls the snapshot run makes against the vendor cloud.
#[async_trait]
pub trait ThermostatApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError>;

    async fn devices(&self, token: &AccessToken) -> Result<Vec<Device>, ApiError>;

    async fn device_data(&self, token: &AccessToken, device_id: &str) -> Result<Snapshot, ApiError>;
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status} returned by the API{}", body_suffix(.body))]
    Status { status: StatusCode, body: String },
    #[error("the access token is not a valid header value: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),
    #[error("unexpected response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

fn body_suffix(body: &str) -> String {
    if body.trim().is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}
