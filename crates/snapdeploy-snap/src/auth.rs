//! Snap Store login

use tracing::{debug, instrument};

use snapdeploy_core::config::DeployConfig;
use snapdeploy_core::error::{AuthError, ConfigError, Result};

use crate::reporter::DeployReporter;
use crate::runner::{CommandRunner, ToolCommand};

/// Logs the build tool in to the store with a token
pub struct Authenticator<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn DeployReporter,
}

impl<'a> Authenticator<'a> {
    /// Create a new authenticator
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a dyn DeployReporter) -> Self {
        Self { runner, reporter }
    }

    /// `<tool> login --with -`; the token is read from stdin
    pub fn login_command(tool: &str) -> ToolCommand {
        ToolCommand::new(tool).arg("login").arg("--with").arg("-")
    }

    /// Log in with the configured token.
    ///
    /// The token goes to the tool's stdin so it never shows up in process
    /// listings. Nothing is launched when no token is configured.
    #[instrument(skip_all, fields(tool = config.tool()))]
    pub fn authenticate(&self, config: &DeployConfig) -> Result<()> {
        self.reporter.log("Attempting to login");

        let token = config.token().ok_or(ConfigError::MissingToken)?;

        let command = Self::login_command(config.tool());
        let output = self
            .runner
            .capture(&command, None, Some(token))
            .map_err(AuthError::Launch)?;

        debug!(code = ?output.code, success = output.success, "login finished");
        if !output.success {
            return Err(AuthError::Failed(output.stderr).into());
        }

        self.reporter.log(&output.stdout);
        Ok(())
    }
}
