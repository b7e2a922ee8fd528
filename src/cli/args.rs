//! Command-line argument parsing
//!
//! Every option falls back to an environment variable so the tool can be driven
//! entirely from the environment in CI pipelines.

use clap::Parser;
use clap::builder::FalseyValueParser;

pub const DEFAULT_REPOSITORY: &str = "docker.io/shmileee";
pub const DEFAULT_LOGIN: &str = "shmileee";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_API_URL: &str = "https://hub.docker.com/v2";
pub const DEFAULT_SPECFILE: &str = "buildspec.yml";
pub const ALL_IMAGES: &str = "all";

#[derive(Parser, Clone)]
#[command(name = "docker-image-builder")]
#[command(about = "Build, tag and publish Docker images declared in per-directory build specifications")]
#[command(version, author)]
pub struct Args {
    /// Target repository prefix for built images
    #[arg(
        long = "repository",
        env = "DOCKER_REPOSITORY",
        default_value = DEFAULT_REPOSITORY,
        help = "Repository prefix, e.g. docker.io/myaccount"
    )]
    pub repository: String,

    /// Registry account used for description updates
    #[arg(
        long = "login",
        env = "DOCKER_LOGIN",
        default_value = DEFAULT_LOGIN,
        help = "Registry login used to update repository descriptions"
    )]
    pub login: String,

    /// Registry password
    #[arg(
        long = "password",
        env = "DOCKER_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true,
        help = "Registry password used to update repository descriptions"
    )]
    pub password: String,

    /// Directory containing one sub-directory per image
    #[arg(
        long = "images-dir",
        env = "IMAGES_DIR",
        default_value = DEFAULT_IMAGES_DIR,
        help = "Directory holding the image directories"
    )]
    pub images_dir: String,

    /// Image directory selector
    #[arg(
        long = "image",
        env = "IMAGE",
        default_value = ALL_IMAGES,
        help = "Image directory to build: 'all' or a glob pattern"
    )]
    pub image: String,

    /// Push images and update descriptions
    #[arg(
        long = "enable-push",
        env = "ENABLE_PUSH",
        value_parser = FalseyValueParser::new(),
        help = "Push built images and update registry descriptions"
    )]
    pub enable_push: bool,

    /// Debug output
    #[arg(
        long = "debug",
        env = "DEBUG",
        value_parser = FalseyValueParser::new(),
        help = "Enable debug output"
    )]
    pub debug: bool,

    /// Dry run mode (print commands without running them)
    #[arg(
        long = "dry-run",
        short = 'n',
        env = "DRY_RUN",
        value_parser = FalseyValueParser::new(),
        help = "Print commands without running them"
    )]
    pub dry_run: bool,

    /// Registry HTTP API base URL
    #[arg(
        long = "api-url",
        env = "DOCKER_API_URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the registry HTTP API"
    )]
    pub api_url: String,

    /// Build specification file name
    #[arg(
        long = "specfile",
        env = "BUILDSPEC_FILE",
        default_value = DEFAULT_SPECFILE,
        help = "Name of the build specification file in each image directory"
    )]
    pub specfile: String,

    /// Timeout in seconds for registry API requests
    #[arg(
        long = "timeout",
        short = 't',
        env = "DOCKER_API_TIMEOUT",
        default_value = "30",
        help = "Timeout for registry API requests in seconds"
    )]
    pub timeout: u64,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("repository", &self.repository)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("images_dir", &self.images_dir)
            .field("image", &self.image)
            .field("enable_push", &self.enable_push)
            .field("debug", &self.debug)
            .field("dry_run", &self.dry_run)
            .field("api_url", &self.api_url)
            .field("specfile", &self.specfile)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_are_parsed() {
        let args = Args::try_parse_from([
            "docker-image-builder",
            "--repository",
            "ghcr.io/acme",
            "--images-dir",
            "containers",
            "--image",
            "base*",
            "--enable-push",
            "--dry-run",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(args.repository, "ghcr.io/acme");
        assert_eq!(args.images_dir, "containers");
        assert_eq!(args.image, "base*");
        assert!(args.enable_push);
        assert!(args.dry_run);
        assert_eq!(args.timeout, 5);
    }

    #[test]
    fn debug_output_hides_password() {
        let args = Args::try_parse_from(["docker-image-builder", "--password", "hunter2"]).unwrap();
        let rendered = format!("{:?}", args);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
