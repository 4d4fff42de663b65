//! The client's two operations
//!
//! Each command assembles one request, resolves credentials for the reference,
//! and makes exactly one call against the collection manager.

pub mod pull;
pub mod push;

pub use pull::{PullOptions, pull};
pub use push::{PushOptions, push};

use std::path::Path;

use crate::common::PathUtils;
use crate::error::{ClientError, Result};

/// Absolute, UTF-8 form of a workspace path as sent on the wire
fn absolute_workspace(workspace: &Path) -> Result<String> {
    let absolute = PathUtils::absolutize(workspace)?;
    absolute.to_str().map(str::to_string).ok_or_else(|| {
        ClientError::Validation(format!(
            "Workspace path is not valid UTF-8: {}",
            absolute.display()
        ))
    })
}
