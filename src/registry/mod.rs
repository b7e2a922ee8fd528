//! Registry module for Docker Hub API interactions
//!
//! This module provides login and repository description updates against the Docker Hub v2
//! HTTP API (or any service exposing the same endpoints).

pub mod auth;
pub mod client;

pub use crate::cli::config::AuthConfig;
pub use auth::Auth;
pub use client::{HubClient, HubClientBuilder};
