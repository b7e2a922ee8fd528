//! Standardized mapping of registry API responses to errors

use crate::error::BuilderError;
use reqwest::StatusCode;

/// Standard error handler for HTTP responses
pub struct HttpErrorHandler;

impl HttpErrorHandler {
    /// Handle login-related HTTP errors
    pub fn handle_auth_error(status: StatusCode, error_text: &str) -> BuilderError {
        let error_msg = match status.as_u16() {
            400 => format!("Invalid login request: {}", error_text),
            401 => "Invalid credentials provided".to_string(),
            403 => "Access denied - account locked or two-factor authentication required".to_string(),
            404 => "Login endpoint not found - check the registry API URL".to_string(),
            429 => "Too many login attempts - rate limited by registry".to_string(),
            _ => format!("Login failed (status {}): {}", status, error_text),
        };

        BuilderError::Auth(error_msg)
    }

    /// Handle registry-related HTTP errors
    pub fn handle_registry_error(
        status: StatusCode,
        error_text: &str,
        operation: &str,
    ) -> BuilderError {
        let error_msg = match status.as_u16() {
            400 => format!("Bad request during {}: {}", operation, error_text),
            401 => format!(
                "Unauthorized to perform {} operation: {}",
                operation, error_text
            ),
            403 => format!(
                "Forbidden: insufficient permissions for {}: {}",
                operation, error_text
            ),
            404 => format!(
                "Repository not found for {} - it must exist before its description can be set: {}",
                operation, error_text
            ),
            429 => format!("Rate limited during {}: {}", operation, error_text),
            500 => format!("Registry server error during {}: {}", operation, error_text),
            502 | 503 => format!("Registry unavailable for {}: {}", operation, error_text),
            _ => format!("{} failed (status {}): {}", operation, status, error_text),
        };

        BuilderError::Registry(error_msg)
    }

    /// Check if an error is worth surfacing as a hint about credentials
    pub fn is_credentials_problem(error: &BuilderError) -> bool {
        match error {
            BuilderError::Auth(_) => true,
            BuilderError::Registry(msg) => {
                msg.starts_with("Unauthorized") || msg.starts_with("Forbidden")
            }
            _ => false,
        }
    }
}
