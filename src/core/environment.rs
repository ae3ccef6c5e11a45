//! Collaborators the logger consumes from the embedding application
//!
//! - [`PathResolver`]: turns a storage fragment into an absolute log path
//! - [`ErrorReporter`]: surfaces configuration failures

use super::error::{LoggerError, Result};
use std::path::{Path, PathBuf};

/// How a resolver treats missing directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// The parent directory must already exist
    Existing,
    /// Missing parent directories are created
    #[default]
    Create,
}

pub trait PathResolver: Send + Sync {
    fn resolve(&self, fragment: &str, mode: ResolveMode) -> Result<PathBuf>;
}

/// Resolves fragments below an application root directory
#[derive(Debug, Clone)]
pub struct StorageRoot {
    root: PathBuf,
}

impl StorageRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PathResolver for StorageRoot {
    fn resolve(&self, fragment: &str, mode: ResolveMode) -> Result<PathBuf> {
        let fragment = Path::new(fragment.trim_start_matches('/'));
        if fragment.as_os_str().is_empty() {
            return Err(LoggerError::config("StorageRoot", "empty path fragment"));
        }

        let root = if self.root.is_absolute() {
            self.root.clone()
        } else {
            std::env::current_dir()
                .map_err(|e| {
                    LoggerError::io_operation("resolving storage root", self.root.display().to_string(), e)
                })?
                .join(&self.root)
        };
        let path = root.join(fragment);

        if let Some(parent) = path.parent() {
            match mode {
                ResolveMode::Create => std::fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        parent.display().to_string(),
                        e,
                    )
                })?,
                ResolveMode::Existing if !parent.is_dir() => {
                    return Err(LoggerError::config(
                        "StorageRoot",
                        format!("directory {} does not exist", parent.display()),
                    ))
                }
                ResolveMode::Existing => {}
            }
        }

        Ok(path)
    }
}

/// Receives configuration failures raised inside the logger
pub trait ErrorReporter: Send + Sync {
    fn report(&self, status: u16, message: &str, file: &str, line: u32);
}

/// Default reporter printing to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&self, status: u16, message: &str, file: &str, line: u32) {
        eprintln!("[LOGGER ERROR] {} {} ({}:{})", status, message, file, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_creates_directories() {
        let dir = tempdir().unwrap();
        let resolver = StorageRoot::new(dir.path());

        let path = resolver
            .resolve("Storage/log/app.txt", ResolveMode::Create)
            .unwrap();

        assert_eq!(path, dir.path().join("Storage/log/app.txt"));
        assert!(dir.path().join("Storage/log").is_dir());
    }

    #[test]
    fn test_resolve_existing_requires_directory() {
        let dir = tempdir().unwrap();
        let resolver = StorageRoot::new(dir.path());

        let err = resolver
            .resolve("missing/app.txt", ResolveMode::Existing)
            .unwrap_err();
        assert!(matches!(err, LoggerError::Configuration { .. }));

        let ok = resolver.resolve("app.txt", ResolveMode::Existing).unwrap();
        assert_eq!(ok, dir.path().join("app.txt"));
    }

    #[test]
    fn test_resolve_rejects_empty_fragment() {
        let resolver = StorageRoot::new("/tmp");
        assert!(resolver.resolve("", ResolveMode::Create).is_err());
    }
}
