//! Snap file discovery and building

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, instrument};

use snapdeploy_core::config::DeployConfig;
use snapdeploy_core::error::{BuildError, Result};

use crate::reporter::{fold, DeployReporter};
use crate::runner::{CommandRunner, ToolCommand};

/// A snap file ready to be pushed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapArtifact {
    path: PathBuf,
    working_directory: PathBuf,
    built: bool,
}

impl SnapArtifact {
    /// Path relative to the working directory, as passed to `push`
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the snap was found in
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Path including the working directory
    pub fn full_path(&self) -> PathBuf {
        self.working_directory.join(&self.path)
    }

    /// Whether a build was run to produce this snap
    pub fn built(&self) -> bool {
        self.built
    }
}

/// Find files in `dir` matching `pattern`, relative to `dir`, in glob order.
///
/// Matches are returned relative to `dir` so they can be handed to a tool
/// running inside it. An absolute `pattern` yields absolute paths.
pub fn find_snaps(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let invalid = |reason: String| BuildError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    };

    // glob drops `.` components from its results, so the root must not carry them either
    let root: PathBuf = dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let escaped = root
        .to_str()
        .map(Pattern::escape)
        .ok_or_else(|| invalid(format!("working directory {} is not valid UTF-8", dir.display())))?;
    let full = Path::new(&escaped).join(pattern);
    let full = full
        .to_str()
        .ok_or_else(|| invalid("pattern is not valid UTF-8".to_string()))?;

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let absolute_pattern = Path::new(pattern).is_absolute();
    let mut matches = Vec::new();
    for path in glob::glob_with(full, options)
        .map_err(|e| invalid(e.to_string()))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
    {
        let stripped = path.strip_prefix(&root).map(Path::to_path_buf);
        let relative = match stripped {
            Ok(relative) => relative,
            Err(_) if absolute_pattern => path,
            Err(_) => {
                return Err(invalid(format!(
                    "match {} is outside {}",
                    path.display(),
                    dir.display()
                ))
                .into())
            }
        };
        matches.push(relative);
    }

    Ok(matches)
}

/// Finds the snap to push, building it when none exists yet
pub struct ArtifactLocator<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn DeployReporter,
}

impl<'a> ArtifactLocator<'a> {
    /// Create a new locator
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a dyn DeployReporter) -> Self {
        Self { runner, reporter }
    }

    /// Return the first snap matching the configured pattern, building once if needed
    #[instrument(skip_all, fields(dir = %config.working_directory().display(), pattern = config.snap_file()))]
    pub fn locate_or_build(&self, config: &DeployConfig) -> Result<SnapArtifact> {
        let dir = config.working_directory();
        let pattern = config.snap_file();

        if !dir.is_dir() {
            return Err(BuildError::MissingWorkingDirectory {
                path: dir.to_path_buf(),
            }
            .into());
        }

        if let Some(path) = find_snaps(dir, pattern)?.into_iter().next() {
            info!(snap = %path.display(), "found existing snap");
            return Ok(SnapArtifact {
                path,
                working_directory: dir.to_path_buf(),
                built: false,
            });
        }

        self.reporter.log("No matching snap found: need to build it");
        self.build(config)?;

        let path = find_snaps(dir, pattern)?
            .into_iter()
            .next()
            .ok_or_else(|| BuildError::NoSnapFound {
                pattern: pattern.to_string(),
            })?;

        info!(snap = %path.display(), "found built snap");
        Ok(SnapArtifact {
            path,
            working_directory: dir.to_path_buf(),
            built: true,
        })
    }

    /// Run the build tool in the working directory
    pub fn build(&self, config: &DeployConfig) -> Result<()> {
        let command = ToolCommand::new(config.tool());
        debug!(command = %command, "building snap");
        fold(self.reporter, "Building snap", || {
            self.runner.run(&command, config.working_directory())
        })
        .map_err(BuildError::Command)?;
        Ok(())
    }
}
