//! snapdeploy snap provider
//!
//! Logs `snapcraft` in to the Snap Store, finds or builds a `.snap`, and
//! pushes it to a release channel.

pub mod artifact;
pub mod auth;
pub mod environment;
pub mod provider;
pub mod publish;
pub mod reporter;
pub mod runner;

#[cfg(test)]
mod testing;

pub use artifact::{find_snaps, ArtifactLocator, SnapArtifact};
pub use auth::Authenticator;
pub use environment::{prepare_environment, with_snap_bin, SNAP_BIN_DIR};
pub use provider::SnapProvider;
pub use publish::Publisher;
pub use reporter::{fold, DeployEvent, DeployReporter, TracingReporter};
pub use runner::{CapturedOutput, CommandRunner, SystemRunner, ToolCommand};
