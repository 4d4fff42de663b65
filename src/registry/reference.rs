//! Registry host resolution for collection references
//!
//! References look like `[host[:port]/]repository[:tag]`. The leading
//! component is only treated as a registry host when it looks like one (it
//! contains a `.` or `:`, or is `localhost`); otherwise the reference belongs
//! to the default index.

use crate::error::{ClientError, Result};

/// Name of the default registry index
pub const INDEX_NAME: &str = "docker.io";
/// Server URL the default index is stored under in credential stores
pub const INDEX_URL: &str = "https://index.docker.io/v1/";

/// A reference split into its registry host and the remainder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName {
    pub registry: String,
    pub remote: String,
}

impl RepositoryName {
    /// Resolve the registry host of a reference.
    pub fn parse(reference: &str) -> Result<Self> {
        if reference.contains("://") {
            return Err(ClientError::invalid_reference(
                reference,
                "repository name cannot contain a scheme",
            ));
        }

        let (index_name, remote) = split_repo_name(reference);
        if index_name.starts_with('-') || index_name.ends_with('-') {
            return Err(ClientError::invalid_reference(
                reference,
                format!("invalid index name ({}), cannot begin or end with a hyphen", index_name),
            ));
        }

        Ok(Self {
            registry: resolve_index_name(index_name),
            remote: remote.to_string(),
        })
    }

    /// Address credentials for this registry are stored under, both as the
    /// `credHelpers` key and as the value handed to a credential helper.
    pub fn credential_server(&self) -> &str {
        if self.registry == INDEX_NAME {
            INDEX_URL
        } else {
            &self.registry
        }
    }
}

fn split_repo_name(reference: &str) -> (&str, &str) {
    match reference.split_once('/') {
        Some((host, remote))
            if host.contains('.') || host.contains(':') || host == "localhost" =>
        {
            (host, remote)
        }
        _ => (INDEX_NAME, reference),
    }
}

/// Strip any scheme and path from a registry address, leaving the host.
pub fn convert_to_hostname(address: &str) -> &str {
    let address = address
        .strip_prefix("http://")
        .or_else(|| address.strip_prefix("https://"))
        .unwrap_or(address);
    address.split('/').next().unwrap_or(address)
}

/// Normalise a registry address to the host name credentials are keyed by.
pub fn resolve_index_name(address: &str) -> String {
    let host = convert_to_hostname(address);
    if host == format!("index.{}", INDEX_NAME) {
        INDEX_NAME.to_string()
    } else {
        host.to_string()
    }
}
