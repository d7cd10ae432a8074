//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "snapdeploy.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "snapdeploy.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".snapdeploy.yaml";

/// Environment variable holding the fallback login token
pub const TOKEN_ENV_VAR: &str = "SNAP_TOKEN";

/// Channel used when none is configured
pub const DEFAULT_CHANNEL: &str = "edge";

/// Glob pattern used to find the snap file
pub const DEFAULT_SNAP_FILE: &str = "*.snap";

/// Working directory used when none is configured
pub const DEFAULT_WORKING_DIRECTORY: &str = ".";

/// Build tool executable
pub const DEFAULT_TOOL: &str = "snapcraft";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".snapdeploy.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# snapdeploy configuration
# The login token is read from $SNAP_TOKEN when not set here.

channel: edge
working_directory: .
snap_file: "*.snap"
tool: snapcraft
skip_login: false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeployOptions;

    #[test]
    fn test_template_parses() {
        let options: DeployOptions = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(options.channel.as_deref(), Some(DEFAULT_CHANNEL));
        assert_eq!(options.snap_file.as_deref(), Some(DEFAULT_SNAP_FILE));
        assert_eq!(options.token, None);
    }
}
