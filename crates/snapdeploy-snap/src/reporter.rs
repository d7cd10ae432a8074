//! Deployment progress reporting

use tracing::{info, info_span, warn};

/// Events emitted while deploying
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Informational message
    Log(String),
    /// A named group of output is starting
    FoldStarted(String),
    /// A named group of output finished
    FoldFinished { name: String, success: bool },
}

/// Trait for reporting deployment progress
pub trait DeployReporter: Send + Sync {
    /// Handle an event
    fn report(&self, event: &DeployEvent);

    /// Report an informational message
    fn log(&self, message: &str) {
        self.report(&DeployEvent::Log(message.to_string()));
    }
}

/// Reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl DeployReporter for TracingReporter {
    fn report(&self, event: &DeployEvent) {
        match event {
            DeployEvent::Log(message) => info!("{}", message),
            DeployEvent::FoldStarted(name) => info!(fold = %name, "started"),
            DeployEvent::FoldFinished { name, success } => {
                if *success {
                    info!(fold = %name, "finished");
                } else {
                    warn!(fold = %name, "failed");
                }
            }
        }
    }
}

/// Run `f` inside the named fold, reporting its start and its outcome
pub fn fold<T, E>(
    reporter: &dyn DeployReporter,
    name: &str,
    f: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    reporter.report(&DeployEvent::FoldStarted(name.to_string()));
    let result = info_span!("fold", fold = %name).in_scope(f);
    reporter.report(&DeployEvent::FoldFinished {
        name: name.to_string(),
        success: result.is_ok(),
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingReporter;

    #[test]
    fn test_fold_reports_both_ends() {
        let reporter = RecordingReporter::new();
        let value: Result<u32, String> = fold(&reporter, "Building snap", || Ok(7));
        assert_eq!(value, Ok(7));
        assert_eq!(
            reporter.events(),
            vec![
                DeployEvent::FoldStarted("Building snap".to_string()),
                DeployEvent::FoldFinished {
                    name: "Building snap".to_string(),
                    success: true
                },
            ]
        );
    }

    #[test]
    fn test_fold_reports_failure() {
        let reporter = RecordingReporter::new();
        let value: Result<(), &str> = fold(&reporter, "Pushing snap", || Err("boom"));
        assert_eq!(value, Err("boom"));
        assert_eq!(
            reporter.events().last(),
            Some(&DeployEvent::FoldFinished {
                name: "Pushing snap".to_string(),
                success: false
            })
        );
    }

    #[test]
    fn test_log_default_method() {
        let reporter = RecordingReporter::new();
        reporter.log("hello");
        assert_eq!(reporter.messages(), vec!["hello".to_string()]);
    }
}
