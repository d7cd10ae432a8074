//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::DeployConfig;

/// Risk levels a snap channel may name
pub const CHANNEL_RISKS: [&str; 4] = ["stable", "candidate", "beta", "edge"];

/// Validate configuration
pub fn validate_config(config: &DeployConfig) -> Result<()> {
    debug!("validating configuration");
    validate_channel(config.channel())?;
    validate_snap_file(config.snap_file())?;
    validate_tool(config.tool())?;
    debug!("configuration validation passed");
    Ok(())
}

/// Check a channel of the form `[track/]risk[/branch]`
pub fn validate_channel(channel: &str) -> Result<()> {
    if channel.is_empty() || channel.chars().any(char::is_whitespace) {
        return Err(invalid("channel", "must be non-empty and contain no whitespace"));
    }

    let parts: Vec<&str> = channel.split('/').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(invalid("channel", "must have the form [track/]risk[/branch]"));
    }

    let has_risk = match parts.as_slice() {
        [risk] => CHANNEL_RISKS.contains(risk),
        // "track/risk" or "risk/branch"
        [first, second] => CHANNEL_RISKS.contains(second) || CHANNEL_RISKS.contains(first),
        [_, risk, _] => CHANNEL_RISKS.contains(risk),
        _ => false,
    };

    if !has_risk {
        return Err(invalid(
            "channel",
            &format!("risk must be one of: {}", CHANNEL_RISKS.join(", ")),
        ));
    }

    Ok(())
}

fn validate_snap_file(pattern: &str) -> Result<()> {
    glob::Pattern::new(pattern).map_err(|e| invalid("snap_file", &e.to_string()))?;
    Ok(())
}

fn validate_tool(tool: &str) -> Result<()> {
    if tool.trim().is_empty() {
        return Err(invalid("tool", "tool cannot be empty"));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::DeployError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
