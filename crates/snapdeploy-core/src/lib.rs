//! snapdeploy core - shared types, errors and configuration
//!
//! This crate holds the deployment configuration (file loading, option
//! resolution and validation), the error hierarchy and the lifecycle types
//! used by the snap provider and the CLI.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DeployConfig, DeployOptions};
pub use error::{
    AuthError, BuildError, CommandError, ConfigError, DeployError, PublishError, Result,
};
pub use types::{DeployReport, DeployStage, FailureState};
