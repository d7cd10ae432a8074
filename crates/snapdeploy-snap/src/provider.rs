//! Snap Store deployment lifecycle
//!
//! A deployment moves through `Unauthenticated -> Authenticated ->
//! ArtifactResolved -> Published`. The first failing step aborts it; the
//! error's [`failure_state`](snapdeploy_core::DeployError::failure_state)
//! names where it stopped. Nothing is retried.

use std::sync::Arc;

use tracing::{info, instrument};

use snapdeploy_core::config::DeployConfig;
use snapdeploy_core::error::Result;
use snapdeploy_core::types::{DeployReport, DeployStage};

use crate::artifact::{ArtifactLocator, SnapArtifact};
use crate::auth::Authenticator;
use crate::environment::prepare_environment;
use crate::publish::Publisher;
use crate::reporter::{DeployReporter, TracingReporter};
use crate::runner::{CommandRunner, SystemRunner};

/// Publishes one snap according to a resolved configuration
pub struct SnapProvider {
    config: DeployConfig,
    runner: Arc<dyn CommandRunner>,
    reporter: Arc<dyn DeployReporter>,
    stage: DeployStage,
}

impl SnapProvider {
    /// Create a provider that runs real processes and reports through tracing
    pub fn new(config: DeployConfig) -> Self {
        Self {
            config,
            runner: Arc::new(SystemRunner::new()),
            reporter: Arc::new(TracingReporter),
            stage: DeployStage::Unauthenticated,
        }
    }

    /// Use a different command runner
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Use a different reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn DeployReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The configuration this provider deploys with
    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// How far the current deployment got
    pub fn stage(&self) -> DeployStage {
        self.stage
    }

    /// Make snap-installed tools reachable. Call once before any other step.
    pub fn prepare(&self) {
        prepare_environment();
    }

    /// Log in to the store, unless the session is managed out-of-band
    pub fn check_auth(&mut self) -> Result<()> {
        if self.config.skip_login() {
            self.reporter.log("Skipping login: using existing session");
        } else {
            Authenticator::new(self.runner.as_ref(), self.reporter.as_ref())
                .authenticate(&self.config)?;
        }
        self.stage = DeployStage::Authenticated;
        Ok(())
    }

    /// Find the snap to push, building it if needed
    pub fn locate_or_build(&mut self) -> Result<SnapArtifact> {
        let artifact = ArtifactLocator::new(self.runner.as_ref(), self.reporter.as_ref())
            .locate_or_build(&self.config)?;
        self.stage = DeployStage::ArtifactResolved;
        Ok(artifact)
    }

    /// Push the snap to the configured channel
    pub fn push(&mut self, artifact: &SnapArtifact) -> Result<()> {
        Publisher::new(self.runner.as_ref(), self.reporter.as_ref())
            .publish(artifact, &self.config)?;
        self.stage = DeployStage::Published;
        Ok(())
    }

    /// Run the whole lifecycle
    #[instrument(skip(self), fields(channel = self.config.channel()))]
    pub fn deploy(&mut self) -> Result<DeployReport> {
        self.stage = DeployStage::Unauthenticated;

        self.check_auth()?;
        let artifact = self.locate_or_build()?;
        self.push(&artifact)?;

        info!(snap = %artifact.path().display(), "deployment complete");
        Ok(DeployReport {
            snap: artifact.path().to_path_buf(),
            working_directory: artifact.working_directory().to_path_buf(),
            channel: self.config.channel().to_string(),
            built: artifact.built(),
            stage: self.stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::CapturedOutput;
    use crate::testing::{create_snap, RecordingReporter, RecordingRunner};
    use snapdeploy_core::config::DeployOptions;
    use snapdeploy_core::error::{ConfigError, DeployError};
    use snapdeploy_core::types::FailureState;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn provider(
        options: DeployOptions,
        runner: RecordingRunner,
    ) -> (SnapProvider, Arc<RecordingRunner>, Arc<RecordingReporter>) {
        let runner = Arc::new(runner);
        let reporter = Arc::new(RecordingReporter::new());
        let config = DeployConfig::resolve_with(options, |_| None);
        let provider = SnapProvider::new(config)
            .with_runner(runner.clone())
            .with_reporter(reporter.clone());
        (provider, runner, reporter)
    }

    #[test]
    fn test_deploy_existing_snap() {
        let temp = TempDir::new().unwrap();
        create_snap(temp.path(), "app.snap");
        let options = DeployOptions::new()
            .token("t1")
            .channel("stable")
            .working_directory(temp.path());
        let (mut provider, runner, _) = provider(options, RecordingRunner::new());

        let report = provider.deploy().unwrap();

        assert_eq!(
            runner.calls(),
            vec![
                "snapcraft login --with -".to_string(),
                "snapcraft push app.snap --release=stable".to_string(),
            ]
        );
        assert_eq!(runner.inputs(), vec![Some("t1".to_string())]);
        assert_eq!(report.snap, PathBuf::from("app.snap"));
        assert_eq!(report.channel, "stable");
        assert!(!report.built);
        assert_eq!(report.stage, DeployStage::Published);
        assert_eq!(provider.stage(), DeployStage::Published);
    }

    #[test]
    fn test_deploy_builds_missing_snap() {
        let temp = TempDir::new().unwrap();
        let options = DeployOptions::new().token("t1").working_directory(temp.path());
        let runner = RecordingRunner::new().on_run(|command, cwd| {
            if command.args().is_empty() {
                create_snap(cwd, "built.snap");
            }
            Ok(())
        });
        let (mut provider, runner, reporter) = provider(options, runner);

        let report = provider.deploy().unwrap();

        assert!(report.built);
        assert_eq!(
            runner.calls(),
            vec![
                "snapcraft login --with -".to_string(),
                "snapcraft".to_string(),
                "snapcraft push built.snap --release=edge".to_string(),
            ]
        );
        let build_logs = reporter
            .messages()
            .iter()
            .filter(|m| m.as_str() == "No matching snap found: need to build it")
            .count();
        assert_eq!(build_logs, 1);
        assert_eq!(
            reporter.folds(),
            vec!["Building snap".to_string(), "Pushing snap".to_string()]
        );
    }

    #[test]
    fn test_missing_token_aborts_before_locate() {
        let temp = TempDir::new().unwrap();
        let options = DeployOptions::new().channel("stable").working_directory(temp.path());
        let (mut provider, runner, reporter) = provider(options, RecordingRunner::new());

        let err = provider.deploy().unwrap_err();

        assert!(matches!(err, DeployError::Config(ConfigError::MissingToken)));
        assert_eq!(err.failure_state(), FailureState::AuthFailed);
        assert!(runner.calls().is_empty());
        assert!(reporter.folds().is_empty());
        assert_eq!(provider.stage(), DeployStage::Unauthenticated);
    }

    #[test]
    fn test_login_failure_stops_lifecycle() {
        let temp = TempDir::new().unwrap();
        create_snap(temp.path(), "app.snap");
        let options = DeployOptions::new().token("t1").working_directory(temp.path());
        let runner = RecordingRunner::new().with_login_output(CapturedOutput {
            success: false,
            code: Some(1),
            stdout: String::new(),
            stderr: "invalid credentials".to_string(),
        });
        let (mut provider, runner, _) = provider(options, runner);

        let err = provider.deploy().unwrap_err();

        assert_eq!(err.to_string(), "Failed to authenticate: invalid credentials");
        assert_eq!(runner.calls(), vec!["snapcraft login --with -".to_string()]);
    }

    #[test]
    fn test_no_snap_after_build() {
        let temp = TempDir::new().unwrap();
        let options = DeployOptions::new().token("t1").working_directory(temp.path());
        let (mut provider, runner, _) = provider(options, RecordingRunner::new());

        let err = provider.deploy().unwrap_err();

        assert_eq!(err.failure_state(), FailureState::NoArtifactFound);
        assert_eq!(provider.stage(), DeployStage::Authenticated);
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_skip_login() {
        let temp = TempDir::new().unwrap();
        create_snap(temp.path(), "app.snap");
        let options = DeployOptions::new()
            .skip_login(true)
            .working_directory(temp.path());
        let (mut provider, runner, _) = provider(options, RecordingRunner::new());

        provider.deploy().unwrap();

        assert_eq!(
            runner.calls(),
            vec!["snapcraft push app.snap --release=edge".to_string()]
        );
    }
}
