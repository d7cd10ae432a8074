//! Exit codes for the CLI

use snapdeploy_core::DeployError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error, including a missing token
pub const CONFIG_ERROR: i32 = 2;

/// Login failed
pub const AUTH_ERROR: i32 = 3;

/// Build failed or no snap found
pub const BUILD_ERROR: i32 = 4;

/// Push failed
pub const PUBLISH_ERROR: i32 = 5;

/// Pick the exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<DeployError>() {
        Some(DeployError::Config(_)) => CONFIG_ERROR,
        Some(DeployError::Auth(_)) => AUTH_ERROR,
        Some(DeployError::Build(_)) => BUILD_ERROR,
        Some(DeployError::Publish(_)) => PUBLISH_ERROR,
        None => ERROR,
    }
}
