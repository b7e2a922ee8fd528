//! Authentication against the registry HTTP API

use crate::cli::config::AuthConfig;
use crate::error::handlers::HttpErrorHandler;
use crate::error::{BuilderError, Result};
use crate::logging::Logger;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone)]
pub struct Auth {
    client: Client,
    api_url: String,
}

impl Auth {
    pub fn new(client: Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, credentials: &AuthConfig, logger: &Logger) -> Result<String> {
        logger.debug(&format!(
            "Attempting authentication for user: {}",
            credentials.username
        ));

        let url = format!("{}/users/login", self.api_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await
            .map_err(|e| BuilderError::Network(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(HttpErrorHandler::handle_auth_error(status, &error_text));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| BuilderError::Auth(format!("Failed to parse login response: {}", e)))?;

        match token_response.token {
            Some(token) if !token.is_empty() => {
                logger.debug(&format!("Token obtained (length: {} chars)", token.len()));
                Ok(token)
            }
            _ => Err(BuilderError::Auth(
                "Login response did not contain a token".to_string(),
            )),
        }
    }
}
