// Client for the registry HTTP API. Holds the HTTP connection pool, the
// login credentials and the session token obtained on first use.

use crate::cli::config::AuthConfig;
use crate::error::handlers::HttpErrorHandler;
use crate::error::{BuilderError, Result};
use crate::logging::Logger;
use crate::registry::auth::Auth;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::OnceCell;

#[derive(Serialize)]
struct DescriptionUpdate<'a> {
    full_description: &'a str,
}

pub struct HubClientBuilder {
    api_url: String,
    credentials: Option<AuthConfig>,
    timeout: Duration,
}

impl HubClientBuilder {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            credentials: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_credentials(mut self, credentials: AuthConfig) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HubClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BuilderError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let api_url = self.api_url.trim_end_matches('/').to_string();
        let auth = Auth::new(client.clone(), &api_url);

        Ok(HubClient {
            client,
            api_url,
            auth,
            credentials: self.credentials,
            token: OnceCell::new(),
        })
    }
}

pub struct HubClient {
    client: Client,
    api_url: String,
    auth: Auth,
    credentials: Option<AuthConfig>,
    token: OnceCell<String>,
}

impl HubClient {
    pub fn builder(api_url: impl Into<String>) -> HubClientBuilder {
        HubClientBuilder::new(api_url)
    }

    /// Session token, logging in on first use
    async fn token(&self, logger: &Logger) -> Result<&str> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            BuilderError::Auth("No registry credentials configured".to_string())
        })?;
        let token = self
            .token
            .get_or_try_init(|| self.auth.login(credentials, logger))
            .await?;
        Ok(token.as_str())
    }

    /// Replace the full description of `namespace/image`
    pub async fn update_description(
        &self,
        namespace: &str,
        image: &str,
        full_description: &str,
        logger: &Logger,
    ) -> Result<()> {
        let token = self.token(logger).await?;
        let url = format!("{}/repositories/{}/{}/", self.api_url, namespace, image);
        logger.debug(&format!("PATCH {}", url));

        let response = self
            .client
            .patch(&url)
            .header(AUTHORIZATION, format!("JWT {}", token))
            .json(&DescriptionUpdate { full_description })
            .send()
            .await
            .map_err(|e| BuilderError::Network(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(HttpErrorHandler::handle_registry_error(
                status,
                &error_text,
                "description update",
            ));
        }

        logger.debug(&format!("Description of {}/{} updated ({})", namespace, image, status));
        Ok(())
    }
}
