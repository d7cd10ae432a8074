//! Locate command - find or build the snap without pushing it

use clap::Args;
use serde::Serialize;
use tracing::info;

use snapdeploy_snap::SnapProvider;

use super::DeployArgs;
use crate::cli::{Cli, OutputFormat};

/// Find the snap, building it if needed, and print its path
#[derive(Debug, Args)]
pub struct LocateCommand {
    #[command(flatten)]
    pub args: DeployArgs,
}

#[derive(Debug, Serialize)]
struct LocateOutput {
    snap: String,
    path: String,
    built: bool,
}

impl LocateCommand {
    /// Execute the locate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing locate command");
        let config = cli.resolve_config(self.args.to_options())?;

        let mut provider = SnapProvider::new(config).with_reporter(cli.reporter());
        provider.prepare();
        let artifact = provider.locate_or_build()?;

        match cli.format {
            OutputFormat::Json => {
                let out = LocateOutput {
                    snap: artifact.path().display().to_string(),
                    path: artifact.full_path().display().to_string(),
                    built: artifact.built(),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                // The bare path is the useful output for scripts, even with --quiet
                println!("{}", artifact.full_path().display());
            }
        }

        Ok(())
    }
}
