//! Wire types for the Hotmart auth endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest<'a> {
    pub api_key: &'a str,
}

/// Response of `POST /auth`. The token is optional on the wire; a success
/// response without one is treated as an authentication failure.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: Option<String>,
}

/// Body of `POST /auth/check`.
#[derive(Debug, Serialize)]
pub struct TokenCheckRequest<'a> {
    pub access_token: &'a str,
}

/// Response of `POST /auth/check`.
#[derive(Debug, Deserialize)]
pub struct TokenCheckResponse {
    pub valid: bool,
}
