//! Error types for snapdeploy

use std::path::PathBuf;
use thiserror::Error;

use crate::types::FailureState;

/// Result type alias using DeployError
pub type Result<T> = std::result::Result<T, DeployError>;

/// Main error type for deployment operations
#[derive(Debug, Error)]
pub enum DeployError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Login-related errors
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Build and artifact discovery errors
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Push-related errors
    #[error(transparent)]
    Publish(#[from] PublishError),

}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No login token was supplied explicitly or through the environment
    #[error("Missing token")]
    MissingToken,

    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Login-related errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login command ran and reported failure
    #[error("Failed to authenticate: {0}")]
    Failed(String),

    /// The login command could not be started
    #[error(transparent)]
    Launch(CommandError),
}

/// Build and artifact discovery errors
#[derive(Debug, Error)]
pub enum BuildError {
    /// Nothing matched the artifact pattern, even after building
    #[error("No snap found matching '{pattern}'")]
    NoSnapFound { pattern: String },

    /// The working directory does not exist
    #[error("Working directory {} does not exist", path.display())]
    MissingWorkingDirectory { path: PathBuf },

    /// The artifact pattern is not a valid glob
    #[error("Invalid snap file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The build command failed
    #[error(transparent)]
    Command(CommandError),
}

/// Push-related errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// The push command failed
    #[error(transparent)]
    Command(CommandError),
}

/// A tool invocation that could not be started or exited unsuccessfully
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Command failed: {command} - {reason}")]
pub struct CommandError {
    /// The command line as it was invoked
    pub command: String,
    /// What went wrong
    pub reason: String,
}

impl CommandError {
    /// Create a new command error
    pub fn new(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

impl DeployError {
    /// The terminal lifecycle state this error leaves a deployment in
    pub fn failure_state(&self) -> FailureState {
        match self {
            Self::Config(ConfigError::MissingToken) | Self::Auth(_) => FailureState::AuthFailed,
            Self::Build(BuildError::NoSnapFound { .. }) => FailureState::NoArtifactFound,
            Self::Build(_) => FailureState::BuildFailed,
            Self::Publish(_) => FailureState::PublishFailed,
            Self::Config(_) => FailureState::Aborted,
        }
    }
}
