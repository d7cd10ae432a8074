//! Pushing snaps to a store channel

use tracing::instrument;

use snapdeploy_core::config::DeployConfig;
use snapdeploy_core::error::{PublishError, Result};

use crate::artifact::SnapArtifact;
use crate::reporter::{fold, DeployReporter};
use crate::runner::{CommandRunner, ToolCommand};

/// Uploads a snap and releases it to a channel
pub struct Publisher<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn DeployReporter,
}

impl<'a> Publisher<'a> {
    /// Create a new publisher
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a dyn DeployReporter) -> Self {
        Self { runner, reporter }
    }

    /// `<tool> push <snap> --release=<channel>`
    pub fn push_command(tool: &str, artifact: &SnapArtifact, channel: &str) -> ToolCommand {
        ToolCommand::new(tool)
            .arg("push")
            .arg(artifact.path().display().to_string())
            .arg(format!("--release={}", channel))
    }

    /// Push the snap from its working directory; any failure aborts the deployment
    #[instrument(skip_all, fields(snap = %artifact.path().display(), channel = config.channel()))]
    pub fn publish(&self, artifact: &SnapArtifact, config: &DeployConfig) -> Result<()> {
        let command = Self::push_command(config.tool(), artifact, config.channel());
        fold(self.reporter, "Pushing snap", || {
            self.runner.run(&command, artifact.working_directory())
        })
        .map_err(PublishError::Command)?;
        Ok(())
    }
}
