//! Configuration management module

use crate::cli::args::{ALL_IMAGES, Args};
use crate::error::{BuilderError, Result};
use globset::Glob;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Registry credentials used for description updates
#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Both parts present
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated settings for one build run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub repository: String,
    pub auth: AuthConfig,
    pub images_dir: PathBuf,
    pub image: String,
    pub enable_push: bool,
    pub debug: bool,
    pub dry_run: bool,
    pub api_url: Url,
    pub specfile: String,
    pub timeout: Duration,
}

impl BuildConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let repository = args.repository.trim().trim_end_matches('/').to_string();
        if repository.is_empty() {
            return Err(BuilderError::Config(
                "Repository cannot be empty".to_string(),
            ));
        }

        if args.images_dir.trim().is_empty() {
            return Err(BuilderError::Config(
                "Images directory cannot be empty".to_string(),
            ));
        }

        let image = args.image.trim().to_string();
        if image.is_empty() {
            return Err(BuilderError::Config(
                "Image selector cannot be empty".to_string(),
            ));
        }
        if image != ALL_IMAGES {
            Glob::new(&image).map_err(|e| {
                BuilderError::Config(format!("Invalid image selector '{}': {}", image, e))
            })?;
        }

        let api_url = Url::parse(args.api_url.trim_end_matches('/'))?;
        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            return Err(BuilderError::Config(format!(
                "Invalid registry API URL: {}. Must start with http:// or https://",
                args.api_url
            )));
        }

        if args.specfile.trim().is_empty() {
            return Err(BuilderError::Config(
                "Build specification file name cannot be empty".to_string(),
            ));
        }

        if args.timeout == 0 {
            return Err(BuilderError::Config(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            repository,
            auth: AuthConfig::new(args.login, args.password),
            images_dir: PathBuf::from(args.images_dir),
            image,
            enable_push: args.enable_push,
            debug: args.debug,
            dry_run: args.dry_run,
            api_url,
            specfile: args.specfile,
            timeout: Duration::from_secs(args.timeout),
        })
    }

    /// Registry account segment of the repository (`docker.io/acme` -> `acme`)
    pub fn namespace(&self) -> &str {
        self.repository
            .rsplit('/')
            .next()
            .unwrap_or(&self.repository)
    }

    pub fn image_repo(&self, image_name: &str) -> String {
        format!("{}/{}", self.repository, image_name)
    }

    pub fn image_ref(&self, image_name: &str, tag: &str) -> String {
        format!("{}:{}", self.image_repo(image_name), tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{DEFAULT_API_URL, DEFAULT_SPECFILE};

    fn args() -> Args {
        Args {
            repository: "docker.io/acme".to_string(),
            login: "acme".to_string(),
            password: String::new(),
            images_dir: "images".to_string(),
            image: ALL_IMAGES.to_string(),
            enable_push: false,
            debug: false,
            dry_run: false,
            api_url: DEFAULT_API_URL.to_string(),
            specfile: DEFAULT_SPECFILE.to_string(),
            timeout: 30,
        }
    }

    #[test]
    fn image_references_use_repository_prefix() {
        let config = BuildConfig::from_args(args()).unwrap();
        assert_eq!(config.image_repo("base"), "docker.io/acme/base");
        assert_eq!(config.image_ref("base", "1.0"), "docker.io/acme/base:1.0");
    }

    #[test]
    fn namespace_is_last_repository_segment() {
        let config = BuildConfig::from_args(args()).unwrap();
        assert_eq!(config.namespace(), "acme");

        let mut bare = args();
        bare.repository = "acme/".to_string();
        let config = BuildConfig::from_args(bare).unwrap();
        assert_eq!(config.repository, "acme");
        assert_eq!(config.namespace(), "acme");
    }

    #[test]
    fn rejects_empty_repository() {
        let mut bad = args();
        bad.repository = "  ".to_string();
        assert!(matches!(
            BuildConfig::from_args(bad),
            Err(BuilderError::Config(_))
        ));
    }

    #[test]
    fn rejects_non_http_api_url() {
        let mut bad = args();
        bad.api_url = "ftp://hub.example.com/v2".to_string();
        assert!(BuildConfig::from_args(bad).is_err());

        let mut bad = args();
        bad.api_url = "not a url".to_string();
        assert!(BuildConfig::from_args(bad).is_err());
    }

    #[test]
    fn rejects_malformed_selector() {
        let mut bad = args();
        bad.image = "base[".to_string();
        assert!(BuildConfig::from_args(bad).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut bad = args();
        bad.timeout = 0;
        assert!(BuildConfig::from_args(bad).is_err());
    }

    #[test]
    fn api_url_trailing_slash_is_dropped() {
        let mut a = args();
        a.api_url = "https://hub.example.com/v2/".to_string();
        let config = BuildConfig::from_args(a).unwrap();
        assert_eq!(config.api_url.as_str(), "https://hub.example.com/v2");
    }

    #[test]
    fn credentials_need_both_parts() {
        assert!(!AuthConfig::new("acme".into(), String::new()).is_complete());
        assert!(AuthConfig::new("acme".into(), "secret".into()).is_complete());
        let rendered = format!("{:?}", AuthConfig::new("acme".into(), "secret".into()));
        assert!(!rendered.contains("secret"));
    }
}
