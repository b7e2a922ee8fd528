//! Build specification model
//!
//! Each image directory carries a YAML file declaring the images to build from it and the
//! tags to build for each image:
//!
//! ```yaml
//! images:
//!   - name: base
//!     tags:
//!       - name: "1.0"
//!         aliases: [latest]
//!         build_args: [VARIANT=slim]
//!         dockerfile: Dockerfile.slim
//!         readme: README.md
//! ```

use crate::error::{BuilderError, Result};
use crate::logging::Logger;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
pub const DEFAULT_README: &str = "README.md";

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSpec {
    pub images: Vec<ImageSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSpec {
    pub name: String,
    pub tags: Vec<TagSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagSpec {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    build_args: Option<BuildArgs>,
    pub dockerfile: Option<String>,
    pub readme: Option<String>,
}

/// Build arguments as a `KEY=VALUE` list or a mapping
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BuildArgs {
    List(Vec<String>),
    Map(BTreeMap<String, serde_yaml::Value>),
}

impl TagSpec {
    pub fn dockerfile(&self) -> &str {
        self.dockerfile.as_deref().unwrap_or(DEFAULT_DOCKERFILE)
    }

    pub fn readme(&self) -> &str {
        self.readme.as_deref().unwrap_or(DEFAULT_README)
    }

    /// Build arguments normalized to `KEY=VALUE` strings
    pub fn build_args(&self) -> Vec<String> {
        match &self.build_args {
            None => Vec::new(),
            Some(BuildArgs::List(args)) => args.clone(),
            Some(BuildArgs::Map(args)) => args
                .iter()
                .map(|(key, value)| format!("{}={}", key, scalar_to_string(value)))
                .collect(),
        }
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl BuildSpec {
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        let spec: BuildSpec =
            serde_yaml::from_str(content).map_err(|e| BuilderError::SpecParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        spec.validate(path)?;
        Ok(spec)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |what: String| {
            BuilderError::Validation(format!("{}: {}", path.display(), what))
        };

        for (i, image) in self.images.iter().enumerate() {
            if image.name.trim().is_empty() {
                return Err(invalid(format!("images[{}].name cannot be empty", i)));
            }
            for (j, tag) in image.tags.iter().enumerate() {
                if tag.name.trim().is_empty() {
                    return Err(invalid(format!(
                        "images[{}].tags[{}].name cannot be empty",
                        i, j
                    )));
                }
                if let Some(alias) = tag.aliases.iter().find(|a| a.trim().is_empty()) {
                    return Err(invalid(format!(
                        "images[{}].tags[{}] has an empty alias '{}'",
                        i, j, alias
                    )));
                }
                if let Some(arg) = tag.build_args().iter().find(|a| !a.contains('=')) {
                    return Err(invalid(format!(
                        "images[{}].tags[{}] build argument '{}' is not KEY=VALUE",
                        i, j, arg
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Read and parse the build specification at `path`
pub fn load_specfile(path: &Path, logger: &Logger) -> Result<BuildSpec> {
    logger.debug(&format!("Using file {}", path.display()));

    let content = std::fs::read_to_string(path).map_err(|e| BuilderError::io(path, e))?;
    let spec = BuildSpec::from_yaml(&content, path)?;

    logger.debug(&format!("Buildspec: {:?}", spec));
    Ok(spec)
}
