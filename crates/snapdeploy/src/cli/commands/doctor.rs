//! Doctor command - check that a deployment could run here

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use snapdeploy_core::DeployConfig;
use snapdeploy_snap::{find_snaps, prepare_environment, CommandRunner, SystemRunner, ToolCommand};

use crate::cli::{output, Cli, OutputFormat};

/// Check that snapcraft, credentials and configuration are usable
#[derive(Debug, Args)]
pub struct DoctorCommand {
    #[command(flatten)]
    pub args: super::DeployArgs,

    /// Show suggestions for fixing issues
    #[arg(long)]
    pub fix: bool,
}

/// Result of a single check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: Option<String>,
    pub fix_suggestion: Option<String>,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: Some(message.into()),
            fix_suggestion: None,
        }
    }

    fn with_fix(mut self, fix: &str) -> Self {
        self.fix_suggestion = Some(fix.to_string());
        self
    }
}

/// Status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
    Skip,
}

/// Summary of all checks
#[derive(Debug, Serialize)]
pub struct DoctorSummary {
    pub checks: Vec<CheckResult>,
    pub ok_count: usize,
    pub warn_count: usize,
    pub fail_count: usize,
    pub skip_count: usize,
}

impl DoctorSummary {
    fn new(checks: Vec<CheckResult>) -> Self {
        let count = |status| checks.iter().filter(|c| c.status == status).count();
        Self {
            ok_count: count(CheckStatus::Ok),
            warn_count: count(CheckStatus::Warn),
            fail_count: count(CheckStatus::Fail),
            skip_count: count(CheckStatus::Skip),
            checks,
        }
    }
}

impl DoctorCommand {
    /// Execute the doctor command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(fix = self.fix, "executing doctor command");
        prepare_environment();

        if !cli.quiet && cli.format == OutputFormat::Text {
            println!("{}", output::header("Checking environment..."));
            println!();
        }

        let (config_check, config) = self.resolve_config(cli);
        let mut checks = vec![config_check];

        checks.push(check_tool(&config, &SystemRunner::new()));
        checks.extend(check_deployment(&config));

        let summary = DoctorSummary::new(checks);

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Text => {
                self.print_results(&summary.checks, cli);
                self.print_summary(&summary);
            }
        }

        if summary.fail_count > 0 {
            anyhow::bail!("{} check(s) failed", summary.fail_count);
        }

        Ok(())
    }

    /// Resolve the configuration, keeping the command-line options even when it is invalid
    fn resolve_config(&self, cli: &Cli) -> (CheckResult, DeployConfig) {
        let overrides = self.args.to_options();
        match cli.resolve_config(overrides.clone()) {
            Ok(config) => (
                CheckResult::new("Configuration", CheckStatus::Ok, "valid"),
                config,
            ),
            Err(e) => {
                let check = CheckResult::new("Configuration", CheckStatus::Fail, e.to_string())
                    .with_fix("Fix snapdeploy.yaml or the command-line options");
                let options = cli.file_options().unwrap_or_default().overlay(overrides);
                (check, DeployConfig::resolve(options))
            }
        }
    }

    fn print_results(&self, checks: &[CheckResult], cli: &Cli) {
        if cli.quiet {
            return;
        }

        for check in checks {
            let icon = status_icon(check.status);
            let name = &check.name;
            let msg = check.message.as_deref().unwrap_or("");

            let name = match check.status {
                CheckStatus::Ok => style(name).green(),
                CheckStatus::Warn => style(name).yellow(),
                CheckStatus::Fail => style(name).red(),
                CheckStatus::Skip => style(name).dim(),
            };
            println!("  {} {} {}", icon, name, style(msg).dim());

            if self.fix && matches!(check.status, CheckStatus::Fail | CheckStatus::Warn) {
                if let Some(ref fix) = check.fix_suggestion {
                    println!("{}", output::key_value("fix", fix));
                }
            }
        }
    }

    fn print_summary(&self, summary: &DoctorSummary) {
        println!();
        if summary.fail_count == 0 && summary.warn_count == 0 {
            output::success(&format!("All {} checks passed!", summary.ok_count));
        } else if summary.fail_count == 0 {
            output::warning(&format!("{} warning(s)", summary.warn_count));
        } else {
            output::error(&format!(
                "{} failed, {} warning(s). Run '{}' for suggestions.",
                summary.fail_count,
                summary.warn_count,
                style("snapdeploy doctor --fix").cyan()
            ));
        }
    }
}

fn status_icon(status: CheckStatus) -> console::StyledObject<&'static str> {
    match status {
        CheckStatus::Ok => style("[OK]").green(),
        CheckStatus::Warn => style("[WARN]").yellow(),
        CheckStatus::Fail => style("[FAIL]").red(),
        CheckStatus::Skip => style("[SKIP]").dim(),
    }
}

/// Is the build tool on the (prepared) search path, and which version is it
fn check_tool(config: &DeployConfig, runner: &dyn CommandRunner) -> CheckResult {
    let tool = config.tool();
    let path = match which::which(tool) {
        Ok(path) => path,
        Err(_) => {
            return CheckResult::new(tool, CheckStatus::Fail, "Not found")
                .with_fix("Install it with 'sudo snap install snapcraft --classic'");
        }
    };

    let version = runner
        .capture(&ToolCommand::new(tool).arg("--version"), None, None)
        .ok()
        .filter(|o| o.success)
        .map(|o| o.stdout.trim().to_string())
        .unwrap_or_else(|| "unknown version".to_string());

    CheckResult::new(
        tool,
        CheckStatus::Ok,
        format!("{} ({})", version, path.display()),
    )
}

/// Token, working directory and snap file checks
fn check_deployment(config: &DeployConfig) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(if config.skip_login() {
        CheckResult::new("Login token", CheckStatus::Skip, "login skipped")
    } else if config.token().is_some() {
        CheckResult::new("Login token", CheckStatus::Ok, "provided")
    } else {
        CheckResult::new("Login token", CheckStatus::Fail, "Missing token")
            .with_fix("Export credentials with 'snapcraft export-login -' and set SNAP_TOKEN")
    });

    let dir = config.working_directory();
    if !dir.is_dir() {
        results.push(
            CheckResult::new(
                "Working directory",
                CheckStatus::Fail,
                format!("{} does not exist", dir.display()),
            )
            .with_fix("Set working_directory to the directory containing snapcraft.yaml"),
        );
        return results;
    }
    results.push(CheckResult::new(
        "Working directory",
        CheckStatus::Ok,
        dir.display().to_string(),
    ));

    results.push(match find_snaps(dir, config.snap_file()) {
        Ok(found) => match found.first() {
            Some(snap) => CheckResult::new("Snap file", CheckStatus::Ok, snap.display().to_string()),
            None => CheckResult::new(
                "Snap file",
                CheckStatus::Warn,
                format!("nothing matches '{}'; it will be built", config.snap_file()),
            ),
        },
        Err(e) => CheckResult::new("Snap file", CheckStatus::Fail, e.to_string()),
    });

    results
}
