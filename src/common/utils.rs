//! Common utilities and helper functions

use crate::error::{ClientError, Result};
use std::path::{Component, Path, PathBuf};

/// File and path utilities
pub struct PathUtils;

impl PathUtils {
    /// Make a path absolute against the current directory
    pub fn absolutize(path: &Path) -> Result<PathBuf> {
        let cwd = std::env::current_dir()
            .map_err(|e| ClientError::Validation(format!("Cannot determine current directory: {}", e)))?;
        Ok(Self::absolutize_from(path, &cwd))
    }

    /// Join a relative path onto `base` and normalise it lexically.
    ///
    /// `.` components are dropped and `..` removes the previous component. The
    /// filesystem is never consulted, so the path does not need to exist and
    /// symlinks are left alone.
    pub fn absolutize_from(path: &Path, base: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        };

        let mut normalized = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => normalized.push(component),
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::Normal(part) => normalized.push(part),
            }
        }
        normalized
    }
}

/// Validation utilities
pub struct ValidationUtils;

impl ValidationUtils {
    /// Validate a collection reference
    pub fn validate_reference(reference: &str) -> Result<()> {
        if reference.trim().is_empty() {
            return Err(ClientError::Validation("Reference cannot be empty".to_string()));
        }
        Ok(())
    }
}
