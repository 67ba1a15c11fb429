//! Platform detection and executable lookup.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`, which also disables the
/// completion pause. Checks common CI environment variables: `CI`,
/// `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Parse a PATH-style value into a list of directories.
pub fn parse_path(path: Option<&OsStr>) -> Vec<PathBuf> {
    path.map(|p| std::env::split_paths(p).collect())
        .unwrap_or_default()
}

/// The current process's PATH.
pub fn system_path() -> Option<OsString> {
    std::env::var_os("PATH")
}

/// Locate an executable.
///
/// A name containing a path separator is checked as-is; a bare name is
/// searched for in each directory of `path`. On Windows the extensions in
/// `PATHEXT` are tried as well.
pub fn find_executable(name: &str, path: Option<&OsStr>) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return executable_variants(candidate).into_iter().find(|p| is_executable(p));
    }

    parse_path(path)
        .into_iter()
        .flat_map(|dir| executable_variants(&dir.join(name)))
        .find(|p| is_executable(p))
}

fn executable_variants(base: &Path) -> Vec<PathBuf> {
    let mut variants = vec![base.to_path_buf()];
    if cfg!(windows) && base.extension().is_none() {
        let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".into());
        for ext in pathext.split(';').filter(|e| !e.is_empty()) {
            let mut with_ext = base.as_os_str().to_os_string();
            with_ext.push(ext.to_lowercase());
            variants.push(PathBuf::from(with_ext));
        }
    }
    variants
}

/// Whether `path` is a file the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn parse_path_handles_missing_value() {
        assert!(parse_path(None).is_empty());
    }

    #[test]
    fn parse_path_splits_entries() {
        let joined = std::env::join_paths(["/a", "/b"]).unwrap();
        assert_eq!(
            parse_path(Some(&joined)),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }

    #[cfg(unix)]
    #[test]
    fn find_executable_searches_path_in_order() {
        let first = tempfile::TempDir::new().unwrap();
        let second = tempfile::TempDir::new().unwrap();
        make_executable(&second.path().join("python3"));
        make_executable(&first.path().join("python3"));

        let path = std::env::join_paths([first.path(), second.path()]).unwrap();
        let found = find_executable("python3", Some(&path)).unwrap();
        assert_eq!(found, first.path().join("python3"));
    }

    #[cfg(unix)]
    #[test]
    fn find_executable_skips_non_executable_files() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("python3"), "not executable").unwrap();

        let path = std::env::join_paths([dir.path()]).unwrap();
        assert!(find_executable("python3", Some(&path)).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn find_executable_accepts_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let exe = dir.path().join("custom-python");
        make_executable(&exe);

        let found = find_executable(exe.to_str().unwrap(), None).unwrap();
        assert_eq!(found, exe);
    }

    #[test]
    fn find_executable_returns_none_for_unknown_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = std::env::join_paths([dir.path()]).unwrap();
        assert!(find_executable("no-such-tool-venvup", Some(&path)).is_none());
    }
}
