//! Docker and git command lines

use super::CommandSpec;
use chrono::{DateTime, Utc};
use std::path::Path;

const DOCKER: &str = "docker";

/// Build date label format passed to image builds
pub const BUILD_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Command lines for the docker CLI
#[derive(Debug, Clone)]
pub struct DockerCommands {
    vcs_ref: String,
    build_date: String,
}

impl DockerCommands {
    pub fn new(vcs_ref: impl Into<String>, build_date: impl Into<String>) -> Self {
        Self {
            vcs_ref: vcs_ref.into(),
            build_date: build_date.into(),
        }
    }

    /// `docker image build` for `image` in `build_dir`
    pub fn build(
        &self,
        build_dir: &Path,
        dockerfile: &str,
        image: &str,
        build_args: &[String],
    ) -> CommandSpec {
        let mut args = vec![
            "image".to_string(),
            "build".to_string(),
            "--rm".to_string(),
            "--force-rm".to_string(),
            format!("--file={}", dockerfile),
            format!("--build-arg=VCS_REF={}", self.vcs_ref),
            format!("--build-arg=BUILD_DATE={}", self.build_date),
        ];
        args.extend(build_args.iter().map(|arg| format!("--build-arg={}", arg)));
        args.push(format!("--tag={}", image));
        args.push(".".to_string());

        CommandSpec::new(DOCKER, args).in_dir(build_dir)
    }

    /// `docker image tag` applying `alias` to `source`
    pub fn tag(&self, source: &str, alias: &str) -> CommandSpec {
        CommandSpec::new(DOCKER, ["image", "tag", source, alias])
    }

    /// `docker image push`
    pub fn push(&self, image: &str) -> CommandSpec {
        CommandSpec::new(DOCKER, ["image", "push", image])
    }
}

/// Short commit hash of the checkout
pub fn vcs_ref_command() -> CommandSpec {
    CommandSpec::new("git", ["rev-parse", "--short", "HEAD"]).captured()
}

pub fn build_date(now: DateTime<Utc>) -> String {
    now.format(BUILD_DATE_FORMAT).to_string()
}
