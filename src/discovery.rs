//! Image directory discovery

use crate::cli::args::ALL_IMAGES;
use crate::error::{BuilderError, Result};
use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};

/// Return the sorted image directories under `images_dir` selected by `selector`.
///
/// `selector` is either `all` or a glob pattern matched against directory names.
/// Hidden directories are only selected by a selector that itself starts with `.`.
/// A missing `images_dir` selects nothing.
pub fn find_image_dirs(images_dir: &Path, selector: &str) -> Result<Vec<PathBuf>> {
    let matcher = selector_matcher(selector)?;
    let include_hidden = selector.starts_with('.');

    let entries = match std::fs::read_dir(images_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(BuilderError::io(images_dir, e)),
    };

    let mut image_dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BuilderError::io(images_dir, e))?;
        let path = entry.path();

        // Follows symlinks, so linked image directories count
        if !path.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        if !include_hidden && file_name.to_string_lossy().starts_with('.') {
            continue;
        }

        let selected = match &matcher {
            None => true,
            Some(matcher) => matcher.is_match(&file_name),
        };
        if selected {
            image_dirs.push(path);
        }
    }

    image_dirs.sort();
    Ok(image_dirs)
}

fn selector_matcher(selector: &str) -> Result<Option<GlobMatcher>> {
    if selector == ALL_IMAGES {
        return Ok(None);
    }

    Glob::new(selector)
        .map(|glob| Some(glob.compile_matcher()))
        .map_err(|e| BuilderError::Config(format!("Invalid image selector '{}': {}", selector, e)))
}
