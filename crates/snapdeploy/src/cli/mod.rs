//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use snapdeploy_core::config::{load_options, load_options_from_dir, validate_config};
use snapdeploy_core::{DeployConfig, DeployOptions};
use snapdeploy_snap::{DeployReporter, TracingReporter};

use commands::{DeployCommand, DoctorCommand, InitCommand, LocateCommand, LoginCommand};
use output::ConsoleReporter;

/// snapdeploy - Publish snaps to the Snap Store
#[derive(Debug, Parser)]
#[command(name = "snapdeploy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (default: search for snapdeploy.yaml upwards)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in, find or build the snap, and push it to a channel
    Deploy(DeployCommand),

    /// Log in to the Snap Store only
    Login(LoginCommand),

    /// Find the snap, building it if needed, and print its path
    Locate(LocateCommand),

    /// Check that snapcraft, credentials and configuration are usable
    Doctor(DoctorCommand),

    /// Write a starter snapdeploy.yaml
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            Commands::Deploy(ref cmd) => cmd.execute(self),
            Commands::Login(ref cmd) => cmd.execute(self),
            Commands::Locate(ref cmd) => cmd.execute(self),
            Commands::Doctor(ref cmd) => cmd.execute(self),
            Commands::Init(ref cmd) => cmd.execute(self),
        }
    }

    /// Options from the config file, or empty options when there is none
    pub fn file_options(&self) -> anyhow::Result<DeployOptions> {
        let options = match &self.config {
            Some(path) => load_options(path)?,
            None => load_options_from_dir(&std::env::current_dir()?)?.0,
        };
        Ok(options)
    }

    /// Merge the config file with command-line options, resolve and validate
    pub fn resolve_config(&self, overrides: DeployOptions) -> anyhow::Result<DeployConfig> {
        let options = self.file_options()?.overlay(overrides);
        let config = DeployConfig::resolve(options);
        validate_config(&config)?;
        debug!(?config, "using configuration");
        Ok(config)
    }

    /// Progress reporter matching the output settings
    pub fn reporter(&self) -> Arc<dyn DeployReporter> {
        if self.quiet || self.format == OutputFormat::Json {
            Arc::new(TracingReporter)
        } else {
            Arc::new(ConsoleReporter)
        }
    }
}
