use crate::app_config::AppConfig;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;

/// Builds the HTTP client shared by all Skyport calls. Every request sends and accepts JSON.
pub fn new_client(config: &AppConfig) -> Result<Client, SkyportClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .default_headers(headers)
        .timeout(config.skyport().request_timeout())
        .build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum SkyportClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
