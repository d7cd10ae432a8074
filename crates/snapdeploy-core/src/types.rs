//! Core types for snapdeploy

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Progress of a single deployment through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStage {
    /// No registry session has been established yet
    Unauthenticated,
    /// Login succeeded, or was skipped because the session already exists
    Authenticated,
    /// A snap file was found or built
    ArtifactResolved,
    /// The snap was pushed to its channel
    Published,
}

impl DeployStage {
    /// Returns the string representation of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
            Self::ArtifactResolved => "artifact_resolved",
            Self::Published => "published",
        }
    }
}

impl std::fmt::Display for DeployStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal state of a deployment that did not reach `Published`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureState {
    /// Missing token or the login command failed
    AuthFailed,
    /// The build command failed or the pattern was unusable
    BuildFailed,
    /// No snap matched the pattern, even after building
    NoArtifactFound,
    /// The push command failed
    PublishFailed,
    /// Failed before the lifecycle started (config, IO)
    Aborted,
}

impl FailureState {
    /// Returns the string representation of the failure state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthFailed => "auth_failed",
            Self::BuildFailed => "build_failed",
            Self::NoArtifactFound => "no_artifact_found",
            Self::PublishFailed => "publish_failed",
            Self::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for FailureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a completed deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployReport {
    /// Snap file that was pushed, relative to the working directory
    pub snap: PathBuf,
    /// Working directory the snap was found in
    pub working_directory: PathBuf,
    /// Channel the snap was released to
    pub channel: String,
    /// Whether a build was needed to produce the snap
    pub built: bool,
    /// Final lifecycle stage
    pub stage: DeployStage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(DeployStage::ArtifactResolved.to_string(), "artifact_resolved");
        assert_eq!(FailureState::NoArtifactFound.to_string(), "no_artifact_found");
    }

    #[test]
    fn test_report_serialization() {
        let report = DeployReport {
            snap: PathBuf::from("app.snap"),
            working_directory: PathBuf::from("."),
            channel: "stable".to_string(),
            built: false,
            stage: DeployStage::Published,
        };

        let yaml = serde_yaml::to_string(&report).unwrap();
        assert!(yaml.contains("stage: published"));
        assert!(yaml.contains("channel: stable"));
    }
}
