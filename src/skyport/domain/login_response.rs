use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub access_token_expires_in: Option<u64>,
    pub token_type: Option<String>,
}
