//! Build loop: discovery, spec loading, and per-tag build/push/describe steps

use crate::cli::config::BuildConfig;
use crate::discovery::find_image_dirs;
use crate::engine::{
    CommandExecutor, CommandSpec, DockerCommands, ProcessExecutor, build_date, vcs_ref_command,
};
use crate::error::{BuilderError, Result};
use crate::logging::Logger;
use crate::registry::HubClient;
use crate::spec::{ImageSpec, TagSpec, load_specfile};
use std::path::{Path, PathBuf};
use std::time::Instant;

const UNKNOWN_VCS_REF: &str = "unknown";

/// What a run did
#[derive(Debug, Default, Clone)]
pub struct BuildReport {
    /// Image references built, aliases included
    pub built: Vec<String>,
    /// Image references a dry run would have built
    pub planned: Vec<String>,
    /// Image references pushed
    pub pushed: Vec<String>,
    /// Repositories whose description was updated
    pub described: Vec<String>,
    /// Image directories without a build specification
    pub skipped: Vec<PathBuf>,
}

pub struct Runner {
    config: BuildConfig,
    logger: Logger,
    executor: Box<dyn CommandExecutor>,
    hub: Option<HubClient>,
}

impl Runner {
    pub fn new(config: BuildConfig) -> Result<Self> {
        let logger = Logger::new(config.debug);
        Self::with_executor(config, logger, Box::new(ProcessExecutor))
    }

    pub fn with_executor(
        config: BuildConfig,
        logger: Logger,
        executor: Box<dyn CommandExecutor>,
    ) -> Result<Self> {
        let hub = if config.enable_push && !config.dry_run {
            Some(
                HubClient::builder(config.api_url.as_str())
                    .with_credentials(config.auth.clone())
                    .with_timeout(config.timeout)
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self {
            config,
            logger,
            executor,
            hub,
        })
    }

    pub async fn run(&self) -> Result<BuildReport> {
        let start_time = Instant::now();
        let mut report = BuildReport::default();

        self.logger.section("Docker Image Builder");
        self.logger.debug(&format!("Configuration: {:?}", self.config));

        let image_dirs = find_image_dirs(&self.config.images_dir, &self.config.image)?;
        if image_dirs.is_empty() {
            self.logger.info(&format!(
                "No image directories found in '{}/' - exiting",
                self.config.images_dir.display()
            ));
            return Ok(report);
        }

        self.logger
            .debug(&format!("Searching directories: {:?}", image_dirs));

        let docker = self.docker_commands().await?;

        for image_dir in &image_dirs {
            let spec_path = image_dir.join(&self.config.specfile);
            if !spec_path.is_file() {
                self.logger.info(&format!(
                    "Ignoring {} - file {} not found",
                    image_dir.display(),
                    self.config.specfile
                ));
                report.skipped.push(image_dir.clone());
                continue;
            }

            let buildspec = load_specfile(&spec_path, &self.logger)?;
            for image in &buildspec.images {
                self.build_image(&docker, image, image_dir, &mut report)
                    .await?;
            }
        }

        if self.config.dry_run {
            self.logger.summary("Planned images", &report.planned);
        } else {
            self.logger.summary("Built images", &report.built);
        }
        self.logger.info(&format!(
            "Finished in {}",
            self.logger.format_duration(start_time.elapsed())
        ));

        Ok(report)
    }

    /// Resolve the labels shared by every build of this run
    async fn docker_commands(&self) -> Result<DockerCommands> {
        // Builds outside a git checkout still get a label
        let vcs_ref = match self.run_cmd(&vcs_ref_command()).await {
            Ok(vcs_ref) => vcs_ref,
            Err(e) => {
                self.logger
                    .warning(&format!("Cannot determine VCS ref: {}", e));
                String::new()
            }
        };
        let vcs_ref = if vcs_ref.trim().is_empty() {
            UNKNOWN_VCS_REF.to_string()
        } else {
            vcs_ref.trim().to_string()
        };

        Ok(DockerCommands::new(vcs_ref, build_date(chrono::Utc::now())))
    }

    async fn build_image(
        &self,
        docker: &DockerCommands,
        image: &ImageSpec,
        build_dir: &Path,
        report: &mut BuildReport,
    ) -> Result<()> {
        for tag in &image.tags {
            let image_repo = self.config.image_repo(&image.name);
            let image_fullname = self.config.image_ref(&image.name, &tag.name);

            self.logger
                .info(&format!("Entering directory {}", build_dir.display()));
            self.logger.info(&format!("Image: {}", image_fullname));

            let build_cmd =
                docker.build(build_dir, tag.dockerfile(), &image_fullname, &tag.build_args());
            self.run_cmd(&build_cmd).await?;
            self.record_built(&image_fullname, report);

            self.push_image(docker, &image_fullname, report).await?;
            self.update_readme(&image.name, tag, build_dir, report)
                .await?;

            for tag_alias in &tag.aliases {
                let image_alias_name = format!("{}:{}", image_repo, tag_alias);
                self.logger
                    .info(&format!("Tag alias: {}", image_alias_name));

                self.run_cmd(&docker.tag(&image_fullname, &image_alias_name))
                    .await?;
                self.record_built(&image_alias_name, report);

                self.push_image(docker, &image_alias_name, report).await?;
            }
        }

        Ok(())
    }

    fn record_built(&self, image: &str, report: &mut BuildReport) {
        if self.config.dry_run {
            report.planned.push(image.to_string());
        } else {
            report.built.push(image.to_string());
        }
    }

    async fn push_image(
        &self,
        docker: &DockerCommands,
        image: &str,
        report: &mut BuildReport,
    ) -> Result<()> {
        if !self.config.enable_push {
            self.logger.info("Not pushing - ENABLE_PUSH not set");
            return Ok(());
        }

        self.run_cmd(&docker.push(image)).await?;
        if !self.config.dry_run {
            report.pushed.push(image.to_string());
        }
        Ok(())
    }

    async fn update_readme(
        &self,
        image_name: &str,
        tag: &TagSpec,
        build_dir: &Path,
        report: &mut BuildReport,
    ) -> Result<()> {
        if !self.config.enable_push {
            return Ok(());
        }

        self.logger
            .info(&format!("Updating README section for {}", image_name));

        let readme_path = build_dir.join(tag.readme());
        if !readme_path.is_file() {
            self.logger.warning(&format!(
                "README file {} not found - skipping description update",
                readme_path.display()
            ));
            return Ok(());
        }

        let hub = match &self.hub {
            Some(hub) => hub,
            None => {
                self.logger
                    .info("Dry run mode enabled - won't update description");
                return Ok(());
            }
        };

        if !self.config.auth.is_complete() {
            self.logger.warning(
                "DOCKER_LOGIN or DOCKER_PASSWORD not set - skipping description update",
            );
            return Ok(());
        }

        let readme_content = std::fs::read_to_string(&readme_path)
            .map_err(|e| BuilderError::io(&readme_path, e))?;

        let namespace = self.config.namespace();
        hub.update_description(namespace, image_name, &readme_content, &self.logger)
            .await?;
        report.described.push(format!("{}/{}", namespace, image_name));
        Ok(())
    }

    /// Run `command`, or only log it in dry-run mode
    async fn run_cmd(&self, command: &CommandSpec) -> Result<String> {
        self.logger.info(&format!("Command: {}", command));

        if self.config.dry_run {
            self.logger.info("Dry run mode enabled - won't run");
            return Ok(String::new());
        }

        self.executor.run(command).await
    }
}
