use crate::app_config::AppConfig;
use crate::domain::credentials::{AccessToken, Credentials};
use crate::domain::device::Device;
use crate::domain::thermostat_api::{ApiError, ThermostatApi};
use crate::domain::Snapshot;
use crate::skyport::domain::{DeviceGet, LoginRequest, LoginResponse};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Daikin Skyport cloud API.
#[derive(Debug)]
pub struct SkyportApi {
    client: Client,
    url: String,
}

impl SkyportApi {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        SkyportApi {
            client,
            url: config.skyport().url().to_string(),
        }
    }

    fn authorized_get(&self, path: &str, token: &AccessToken) -> Result<RequestBuilder, ApiError> {
        let mut authorization = HeaderValue::from_str(&token.bearer())?;
        authorization.set_sensitive(true);

        Ok(self.client.get(format!("{}{}", self.url, path)).header(AUTHORIZATION, authorization))
    }
}

#[async_trait]
impl ThermostatApi for SkyportApi {
    #[instrument(skip_all)]
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        info!("Logging in...");

        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response = self.client.post(format!("{}/users/auth/login", self.url)).json(&request).send().await?;
        let login = read_json::<LoginResponse>(response).await?;

        debug!(
            token_type = ?login.token_type,
            expires_in_s = ?login.access_token_expires_in,
            "Logging in... OK"
        );
        Ok(AccessToken::new(login.access_token))
    }

    #[instrument(skip_all)]
    async fn devices(&self, token: &AccessToken) -> Result<Vec<Device>, ApiError> {
        info!("Retrieving devices...");

        let response = self.authorized_get("/devices", token)?.send().await?;
        let entries = read_json::<Vec<serde_json::Value>>(response).await?;
        let total = entries.len();

        // A single unreadable entry must not hide the other thermostats
        let devices = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<DeviceGet>(entry) {
                Ok(device_get) => Some(Device::from(device_get)),
                Err(e) => {
                    warn!(index, "⚠️ Skipping unreadable device entry: {}", e);
                    None
                }
            })
            .collect::<Vec<_>>();

        info!("Retrieving devices... OK, {} found, {} skipped", devices.len(), total - devices.len());
        Ok(devices)
    }

    #[instrument(skip(self, token))]
    async fn device_data(&self, token: &AccessToken, device_id: &str) -> Result<Snapshot, ApiError> {
        info!("Retrieving device data...");

        let path = format!("/deviceData/{}", urlencoding::encode(device_id));
        let response = self.authorized_get(&path, token)?.send().await?;
        let snapshot = read_json::<Snapshot>(response).await?;

        info!("Retrieving device data... OK, {} fields", snapshot.len());
        Ok(snapshot)
    }
}

/// Reads the body of a response, failing on a non-success status before attempting to parse it.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::{FieldValue, Number};
    use crate::skyport::new_client;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::error::Error;
    use test_log::test;

    const TOKEN: &str = "eyJraWQiOiJza3lwb3J0LXRlc3QiLCJhbGciOiJSUzI1NiJ9";

    fn api(server: &Server) -> Result<SkyportApi, Box<dyn Error>> {
        let config = AppConfigBuilder::new().skyport_url(server.url()).build();
        Ok(SkyportApi::new(new_client(&config)?, &config))
    }

    #[test(tokio::test)]
    async fn login_posts_the_credentials_and_returns_the_access_token() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/users/auth/login")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(Matcher::Json(json!({"email": "jane@example.com", "password": "hunter2"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/skyport_login_response.json"))
            .create_async()
            .await;

        let token = api(&server)?.login(&Credentials::new("jane@example.com", "hunter2")).await?;

        mock.assert_async().await;
        assert_eq!(token, AccessToken::new(TOKEN));

        Ok(())
    }

    #[test(tokio::test)]
    async fn login_fails_on_an_unauthorized_status() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/users/auth/login")
            .with_status(401)
            .with_body(r#"{"message":"Login failed"}"#)
            .create_async()
            .await;

        let result = api(&server)?.login(&Credentials::new("jane@example.com", "wrong")).await;

        match result {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(body, r#"{"message":"Login failed"}"#);
            }
            other => panic!("expected a status error, got {:?}", other),
        }

        Ok(())
    }

    #[test(tokio::test)]
    async fn login_fails_when_the_access_token_is_missing() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/users/auth/login")
            .with_status(200)
            .with_body(r#"{"tokenType":"Bearer"}"#)
            .create_async()
            .await;

        let result = api(&server)?.login(&Credentials::new("jane@example.com", "hunter2")).await;

        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));

        Ok(())
    }

    #[test(tokio::test)]
    async fn login_fails_when_the_server_is_unreachable() -> Result<(), Box<dyn Error>> {
        let config = AppConfigBuilder::new().skyport_url("http://127.0.0.1:9".to_string()).build();
        let api = SkyportApi::new(new_client(&config)?, &config);

        let result = api.login(&Credentials::new("jane@example.com", "hunter2")).await;

        assert!(matches!(result, Err(ApiError::Transport(_))));

        Ok(())
    }

    #[test(tokio::test)]
    async fn devices_returns_mapped_devices_in_response_order() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/devices")
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/skyport_devices_response.json"))
            .create_async()
            .await;

        let devices = api(&server)?.devices(&AccessToken::new(TOKEN)).await?;

        mock.assert_async().await;
        assert_eq!(
            devices,
            vec![
                Device {
                    id: "0f6a3c2e-9d41-4b7a-8c55-2b1f0e7d9a10".to_string(),
                    name: "Living Room #1 (Main)".to_string(),
                    model: Some("ONEPLUS".to_string()),
                    firmware_version: Some("3.2.19".to_string()),
                },
                Device {
                    id: "5e2d8b17-3a6c-4f90-b1d4-7c8e9f0a1b23".to_string(),
                    name: "Upstairs".to_string(),
                    model: None,
                    firmware_version: None,
                },
            ]
        );

        Ok(())
    }

    #[test(tokio::test)]
    async fn devices_accepts_an_empty_inventory() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        server.mock("GET", "/devices").with_status(200).with_body("[]").create_async().await;

        let devices = api(&server)?.devices(&AccessToken::new(TOKEN)).await?;

        assert!(devices.is_empty());

        Ok(())
    }

    #[test(tokio::test)]
    async fn devices_skips_unreadable_entries_and_keeps_the_rest() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/devices")
            .with_status(200)
            .with_body(
                r#"[
                    {"id": 101, "name": "Upstairs"},
                    {"id": null, "name": "Broken"},
                    {"id": "abc", "name": null},
                    "not a device",
                    {"id": "def", "name": "Downstairs"}
                ]"#,
            )
            .create_async()
            .await;

        let devices = api(&server)?.devices(&AccessToken::new(TOKEN)).await?;

        let ids_and_names = devices
            .iter()
            .map(|device| (device.id.as_str(), device.name.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            ids_and_names,
            vec![("101", "Upstairs"), ("abc", "Device abc"), ("def", "Downstairs")]
        );

        Ok(())
    }

    #[test(tokio::test)]
    async fn devices_fails_when_the_body_is_not_a_list() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        server.mock("GET", "/devices").with_status(200).with_body(r#"{"devices": []}"#).create_async().await;

        let result = api(&server)?.devices(&AccessToken::new(TOKEN)).await;

        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));

        Ok(())
    }

    #[test(tokio::test)]
    async fn devices_fails_on_a_server_error() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        server.mock("GET", "/devices").with_status(503).create_async().await;

        let result = api(&server)?.devices(&AccessToken::new(TOKEN)).await;

        assert!(matches!(result, Err(ApiError::Status { status, .. }) if status == StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }

    #[test(tokio::test)]
    async fn device_data_returns_the_full_document() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/deviceData/0f6a3c2e-9d41-4b7a-8c55-2b1f0e7d9a10")
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/skyport_device_data_response.json"))
            .create_async()
            .await;

        let snapshot = api(&server)?
            .device_data(&AccessToken::new(TOKEN), "0f6a3c2e-9d41-4b7a-8c55-2b1f0e7d9a10")
            .await?;

        mock.assert_async().await;
        assert_eq!(snapshot.len(), 19);
        assert_eq!(
            snapshot.get("ctAHHeatRequestedDemandPercent"),
            Some(&FieldValue::Number(Number::PositiveInt(150)))
        );

        Ok(())
    }

    #[test(tokio::test)]
    async fn device_data_fails_when_the_body_is_not_an_object() -> Result<(), Box<dyn Error>> {
        let mut server = Server::new_async().await;

        server.mock("GET", "/deviceData/42").with_status(200).with_body("[1, 2, 3]").create_async().await;

        let result = api(&server)?.device_data(&AccessToken::new(TOKEN), "42").await;

        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));

        Ok(())
    }
}
