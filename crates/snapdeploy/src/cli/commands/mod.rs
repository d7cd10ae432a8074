//! CLI commands

mod deploy;
mod doctor;
mod init;
mod locate;
mod login;

pub use deploy::DeployCommand;
pub use doctor::DoctorCommand;
pub use init::InitCommand;
pub use locate::LocateCommand;
pub use login::LoginCommand;

use std::path::PathBuf;

use clap::Args;

use snapdeploy_core::DeployOptions;

/// Deployment options shared by the commands that talk to snapcraft
#[derive(Debug, Clone, Default, Args)]
pub struct DeployArgs {
    /// Snap Store login token (default: $SNAP_TOKEN).
    ///
    /// Prefer SNAP_TOKEN: a value given here is visible in process listings.
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Channel to release to (default: edge)
    #[arg(long)]
    pub channel: Option<String>,

    /// Glob pattern for an existing snap (default: *.snap)
    #[arg(long)]
    pub snap_file: Option<String>,

    /// Directory to find or build the snap in (default: .)
    #[arg(long)]
    pub working_directory: Option<PathBuf>,

    /// Build tool executable (default: snapcraft)
    #[arg(long)]
    pub tool: Option<String>,

    /// Use the session snapcraft already has instead of logging in
    #[arg(long)]
    pub skip_login: bool,
}

impl DeployArgs {
    /// Convert to options; unset flags leave room for the config file
    pub fn to_options(&self) -> DeployOptions {
        DeployOptions {
            token: self.token.clone(),
            channel: self.channel.clone(),
            working_directory: self.working_directory.clone(),
            snap_file: self.snap_file.clone(),
            tool: self.tool.clone(),
            skip_login: self.skip_login.then_some(true),
        }
    }
}
