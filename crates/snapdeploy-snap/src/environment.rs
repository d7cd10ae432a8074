//! Search path preparation
//!
//! When snapcraft is installed as a snap its launcher lives in `/snap/bin`,
//! which is not on the default `PATH` of most CI images.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Directory snap launchers are installed into
pub const SNAP_BIN_DIR: &str = "/snap/bin";

/// Return `current` with [`SNAP_BIN_DIR`] appended, unless it is already present
pub fn with_snap_bin(current: Option<OsString>) -> OsString {
    let current = current.unwrap_or_default();
    if current.is_empty() {
        return OsString::from(SNAP_BIN_DIR);
    }

    let mut paths: Vec<PathBuf> = env::split_paths(&current).collect();
    if paths.iter().any(|p| p == Path::new(SNAP_BIN_DIR)) {
        return current;
    }

    paths.push(PathBuf::from(SNAP_BIN_DIR));
    env::join_paths(paths).unwrap_or_else(|_| {
        let mut joined = current.clone();
        joined.push(":");
        joined.push(SNAP_BIN_DIR);
        joined
    })
}

/// Make snap-installed tools reachable for the rest of the process.
///
/// Safe to call more than once. Must run before any threads that read the
/// environment are started.
pub fn prepare_environment() {
    let updated = with_snap_bin(env::var_os("PATH"));
    debug!(path = ?updated, "prepared executable search path");
    env::set_var("PATH", updated);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_appends_snap_bin() {
        let path = with_snap_bin(Some(OsString::from("/usr/local/bin:/usr/bin")));
        assert_eq!(path, OsString::from("/usr/local/bin:/usr/bin:/snap/bin"));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_idempotent() {
        let once = with_snap_bin(Some(OsString::from("/usr/bin")));
        let twice = with_snap_bin(Some(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(with_snap_bin(None), OsString::from(SNAP_BIN_DIR));
        assert_eq!(with_snap_bin(Some(OsString::new())), OsString::from(SNAP_BIN_DIR));
    }

    #[test]
    fn test_prepare_environment() {
        prepare_environment();
        prepare_environment();

        let path = env::var_os("PATH").unwrap();
        let count = env::split_paths(&path)
            .filter(|p| p == Path::new(SNAP_BIN_DIR))
            .count();
        assert_eq!(count, 1);
    }
}
