//! Deploy command - the full login, build and push lifecycle

use clap::Args;
use tracing::info;

use snapdeploy_snap::SnapProvider;

use super::DeployArgs;
use crate::cli::{output, Cli, OutputFormat};

/// Log in, find or build the snap, and push it to a channel
#[derive(Debug, Args)]
pub struct DeployCommand {
    #[command(flatten)]
    pub args: DeployArgs,
}

impl DeployCommand {
    /// Execute the deploy command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = cli.resolve_config(self.args.to_options())?;
        info!(channel = config.channel(), "executing deploy command");

        let mut provider = SnapProvider::new(config).with_reporter(cli.reporter());
        provider.prepare();
        let report = provider.deploy()?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!(
                        "Released {} to {}",
                        output::path_style().apply_to(report.snap.display()),
                        output::channel_style().apply_to(&report.channel)
                    ));
                }
            }
        }

        Ok(())
    }
}
