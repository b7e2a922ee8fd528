//! Command line interface module
//!
//! This module provides the entry point for parsing command-line arguments and running the main workflow.
//! It includes argument parsing, validation, and the runner that drives image builds.

pub mod args;
pub mod config;
pub mod runner;

pub use args::Args;
pub use config::{AuthConfig, BuildConfig};
pub use runner::{BuildReport, Runner};
