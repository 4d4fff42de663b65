//! Configuration management module

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::collection::AttributeTable;
use crate::manager::proto;

pub const SOCKET_ENV: &str = "UOR_SOCKET_ADDRESS";
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/uor.sock";
pub const DOCKER_CONFIG_ENV: &str = "DOCKER_CONFIG";

/// Registry login credentials resolved for a single server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub server_address: String,
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(server_address: String, username: String, password: String) -> Self {
        Self {
            server_address,
            username,
            password,
        }
    }
}

impl From<AuthConfig> for proto::AuthConfig {
    fn from(auth: AuthConfig) -> Self {
        proto::AuthConfig {
            server_address: auth.server_address,
            username: auth.username,
            password: auth.password,
        }
    }
}

/// Outcome of credential resolution for a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryAuth {
    /// A matching credential entry was found
    Credentials(AuthConfig),
    /// No credentials exist for the registry
    Anonymous,
}

impl RegistryAuth {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, RegistryAuth::Anonymous)
    }

    /// The wire form: anonymous access leaves the `auth` field unset.
    pub fn into_proto(self) -> Option<proto::AuthConfig> {
        match self {
            RegistryAuth::Credentials(auth) => Some(auth.into()),
            RegistryAuth::Anonymous => None,
        }
    }
}

/// Process-wide client settings, resolved once at startup
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub socket_path: PathBuf,
    /// Directory holding the Docker `config.json`; `None` means `~/.docker`
    pub docker_config_dir: Option<PathBuf>,
    pub attribute_table: AttributeTable,
}

impl ClientConfig {
    pub fn new(socket: Option<&str>, docker_config_dir: Option<PathBuf>) -> Self {
        Self {
            socket_path: Self::resolve_socket_path(socket),
            docker_config_dir: docker_config_dir.filter(|dir| !dir.as_os_str().is_empty()),
            attribute_table: AttributeTable::default(),
        }
    }

    /// An unset or empty value falls back to [`DEFAULT_SOCKET_PATH`].
    pub fn resolve_socket_path(value: Option<&str>) -> PathBuf {
        match value.filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => {
                info!(
                    "Using socket location {}. To customize, use the {} environment variable.",
                    DEFAULT_SOCKET_PATH, SOCKET_ENV
                );
                PathBuf::from(DEFAULT_SOCKET_PATH)
            }
        }
    }
}
