//! Configuration types

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::defaults::{DEFAULT_CHANNEL, DEFAULT_SNAP_FILE, DEFAULT_TOOL, DEFAULT_WORKING_DIRECTORY, TOKEN_ENV_VAR};

/// Deployment options as supplied by the caller or a config file.
///
/// Every field is optional; [`DeployConfig::resolve`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployOptions {
    /// Snap Store login token
    pub token: Option<String>,

    /// Release channel (e.g. "edge", "beta", "latest/stable")
    pub channel: Option<String>,

    /// Directory to search for (and build) the snap in
    pub working_directory: Option<PathBuf>,

    /// Glob pattern the snap file must match
    pub snap_file: Option<String>,

    /// Build tool executable
    pub tool: Option<String>,

    /// Assume the tool already holds a valid login session
    pub skip_login: Option<bool>,
}

impl DeployOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the channel
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set the working directory
    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Set the snap file pattern
    pub fn snap_file(mut self, pattern: impl Into<String>) -> Self {
        self.snap_file = Some(pattern.into());
        self
    }

    /// Set the build tool
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set whether login is skipped
    pub fn skip_login(mut self, skip: bool) -> Self {
        self.skip_login = Some(skip);
        self
    }

    /// Layer `overrides` on top of these options; set fields in `overrides` win
    pub fn overlay(self, overrides: DeployOptions) -> Self {
        Self {
            token: overrides.token.or(self.token),
            channel: overrides.channel.or(self.channel),
            working_directory: overrides.working_directory.or(self.working_directory),
            snap_file: overrides.snap_file.or(self.snap_file),
            tool: overrides.tool.or(self.tool),
            skip_login: overrides.skip_login.or(self.skip_login),
        }
    }
}

/// Fully-resolved deployment configuration. Read-only once built.
#[derive(Clone, PartialEq, Eq)]
pub struct DeployConfig {
    token: Option<String>,
    channel: String,
    working_directory: PathBuf,
    snap_file: String,
    tool: String,
    skip_login: bool,
}

impl DeployConfig {
    /// Resolve options against the process environment
    pub fn resolve(options: DeployOptions) -> Self {
        Self::resolve_with(options, |key| std::env::var(key).ok())
    }

    /// Resolve options, reading environment variables through `env`
    pub fn resolve_with<F>(options: DeployOptions, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            token: resolve_token(options.token, &env),
            channel: resolve_channel(options.channel),
            working_directory: resolve_working_directory(options.working_directory),
            snap_file: resolve_snap_file(options.snap_file),
            tool: resolve_tool(options.tool),
            skip_login: options.skip_login.unwrap_or(false),
        };
        debug!(?config, "resolved deploy configuration");
        config
    }

    /// Login token, if one was supplied
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Release channel
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Directory the snap is searched for and built in
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Glob pattern for the snap file
    pub fn snap_file(&self) -> &str {
        &self.snap_file
    }

    /// Build tool executable
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Whether the login step is skipped
    pub fn skip_login(&self) -> bool {
        self.skip_login
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::resolve_with(DeployOptions::default(), |_| None)
    }
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("channel", &self.channel)
            .field("working_directory", &self.working_directory)
            .field("snap_file", &self.snap_file)
            .field("tool", &self.tool)
            .field("skip_login", &self.skip_login)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve_token<F>(explicit: Option<String>, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(explicit).or_else(|| non_empty(env(TOKEN_ENV_VAR)))
}

fn resolve_channel(channel: Option<String>) -> String {
    non_empty(channel).unwrap_or_else(|| DEFAULT_CHANNEL.to_string())
}

fn resolve_working_directory(dir: Option<PathBuf>) -> PathBuf {
    dir.filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKING_DIRECTORY))
}

fn resolve_snap_file(pattern: Option<String>) -> String {
    non_empty(pattern).unwrap_or_else(|| DEFAULT_SNAP_FILE.to_string())
}

fn resolve_tool(tool: Option<String>) -> String {
    non_empty(tool).unwrap_or_else(|| DEFAULT_TOOL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = DeployConfig::resolve_with(DeployOptions::new(), no_env);
        assert_eq!(config.token(), None);
        assert_eq!(config.channel(), "edge");
        assert_eq!(config.working_directory(), Path::new("."));
        assert_eq!(config.snap_file(), "*.snap");
        assert_eq!(config.tool(), "snapcraft");
        assert!(!config.skip_login());
    }

    #[test]
    fn test_explicit_token_wins_over_env() {
        let options = DeployOptions::new().token("explicit");
        let config = DeployConfig::resolve_with(options, |_| Some("from-env".to_string()));
        assert_eq!(config.token(), Some("explicit"));
    }

    #[test]
    fn test_token_falls_back_to_env() {
        let config = DeployConfig::resolve_with(DeployOptions::new(), |key| {
            (key == "SNAP_TOKEN").then(|| "from-env".to_string())
        });
        assert_eq!(config.token(), Some("from-env"));
    }

    #[test]
    fn test_empty_values_fall_back() {
        let options = DeployOptions::new().token("").channel(" ").snap_file("");
        let config = DeployConfig::resolve_with(options, no_env);
        assert_eq!(config.token(), None);
        assert_eq!(config.channel(), "edge");
        assert_eq!(config.snap_file(), "*.snap");
    }

    #[test]
    fn test_overlay() {
        let file = DeployOptions::new().channel("beta").snap_file("dist/*.snap");
        let cli = DeployOptions::new().channel("stable");

        let merged = file.overlay(cli);
        assert_eq!(merged.channel.as_deref(), Some("stable"));
        assert_eq!(merged.snap_file.as_deref(), Some("dist/*.snap"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DeployConfig::resolve_with(DeployOptions::new().token("s3cret"), no_env);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }
}
