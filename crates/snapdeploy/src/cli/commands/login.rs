//! Login command

use clap::Args;
use tracing::info;

use snapdeploy_snap::SnapProvider;

use super::DeployArgs;
use crate::cli::{output, Cli, OutputFormat};

/// Log in to the Snap Store only
#[derive(Debug, Args)]
pub struct LoginCommand {
    #[command(flatten)]
    pub args: DeployArgs,
}

impl LoginCommand {
    /// Execute the login command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing login command");
        let config = cli.resolve_config(self.args.to_options())?;

        let mut provider = SnapProvider::new(config).with_reporter(cli.reporter());
        provider.prepare();
        provider.check_auth()?;

        match cli.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({ "stage": provider.stage() })
                );
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success("Logged in");
                }
            }
        }

        Ok(())
    }
}
