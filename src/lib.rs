//! Docker Image Builder Library
//!
//! This file serves as the library root for the docker-image-builder crate,
//! organizing and exposing the various modules that make up the application.

pub mod cli;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod logging;
pub mod registry;
pub mod spec;

pub use cli::{Args, BuildConfig, BuildReport, Runner};
pub use error::{BuilderError, Result};
pub use logging::Logger;
