//! github-oidc CLI library exports for integration testing.

pub mod commands;
pub mod config;
pub mod errors;
