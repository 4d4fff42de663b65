//! Registry credential resolution from the local Docker configuration
//!
//! Credentials are read from `config.json` in the Docker config directory
//! (`DOCKER_CONFIG`, defaulting to `~/.docker`). Entries may carry a base64
//! `auth` field or plain `username`/`password` fields. When the file names a
//! credential helper (`credsStore` or a per-registry `credHelpers` entry), the
//! helper program `docker-credential-<name>` is asked instead.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::reference::{RepositoryName, resolve_index_name};
use crate::config::{AuthConfig, RegistryAuth};
use crate::error::{ClientError, Result};

const CONFIG_FILE: &str = "config.json";
const HELPER_PREFIX: &str = "docker-credential-";
const HELPER_NOT_FOUND: &str = "credentials not found";

/// Parsed Docker `config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerConfig {
    #[serde(default)]
    auths: BTreeMap<String, AuthEntry>,
    #[serde(rename = "credsStore", default, skip_serializing_if = "Option::is_none")]
    creds_store: Option<String>,
    #[serde(rename = "credHelpers", default)]
    cred_helpers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AuthEntry {
    /// Base64-encoded "username:password"
    auth: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

/// Username/password pair found in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Output of `docker-credential-<name> get`
#[derive(Debug, Deserialize)]
struct HelperResponse {
    #[serde(rename = "Username")]
    username: String,
    #[serde(rename = "Secret")]
    secret: String,
}

impl DockerConfig {
    /// Directory used when no explicit config directory is given (~/.docker)
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            ClientError::Credentials("Cannot determine home directory".to_string())
        })?;
        Ok(home.join(".docker"))
    }

    /// Load `config.json` from a config directory. A missing file is an empty
    /// store; an unreadable or malformed one is an error.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_dir()?,
        };
        Self::load_from_path(&dir.join(CONFIG_FILE))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No credential store at {}", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Credentials(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: DockerConfig = serde_json::from_str(&contents).map_err(|e| {
            ClientError::Credentials(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        debug!(
            "Loaded credential store {} ({} registries)",
            path.display(),
            config.auths.len()
        );
        Ok(config)
    }

    /// Credential helper responsible for a registry, if any. An empty
    /// `credHelpers` entry defers to `credsStore`.
    pub fn credential_helper(&self, name: &RepositoryName) -> Option<&str> {
        let non_empty = |helper: &&str| !helper.is_empty();
        self.cred_helpers
            .get(name.credential_server())
            .map(String::as_str)
            .filter(non_empty)
            .or_else(|| self.creds_store.as_deref().filter(non_empty))
    }

    /// Look up stored credentials for a registry host.
    ///
    /// Keys are matched exactly first, then by their normalised host name so
    /// that `https://index.docker.io/v1/` answers for `docker.io`. When several
    /// keys normalise to the host, the first in key order wins.
    pub fn stored_credentials(&self, registry: &str) -> Result<Option<Credentials>> {
        let entry = self.auths.get(registry).or_else(|| {
            self.auths
                .iter()
                .find(|(key, _)| resolve_index_name(key) == registry)
                .map(|(_, entry)| entry)
        });

        match entry {
            Some(entry) => entry.credentials(),
            None => Ok(None),
        }
    }

    pub fn registries(&self) -> Vec<String> {
        self.auths.keys().cloned().collect()
    }
}

impl AuthEntry {
    fn credentials(&self) -> Result<Option<Credentials>> {
        if let Some(auth) = self.auth.as_deref().filter(|a| !a.is_empty()) {
            return decode_auth(auth).map(Some);
        }

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            })),
            _ => Ok(None),
        }
    }
}

fn decode_auth(auth: &str) -> Result<Credentials> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(auth)
        .map_err(|e| ClientError::Credentials(format!("Invalid auth entry: {}", e)))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|e| ClientError::Credentials(format!("Invalid auth entry: {}", e)))?;

    match decoded.split_once(':') {
        Some((username, password)) => Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }),
        None => Err(ClientError::Credentials(
            "Invalid auth entry: expected username:password".to_string(),
        )),
    }
}

/// Interpret the result of a credential helper `get` call.
///
/// A "credentials not found" answer means no credentials; any other failure
/// is an error.
fn parse_helper_output(
    helper: &str,
    success: bool,
    stdout: &[u8],
    stderr: &[u8],
) -> Result<Option<Credentials>> {
    if !success {
        let stdout = String::from_utf8_lossy(stdout);
        let stderr = String::from_utf8_lossy(stderr);
        if stdout.contains(HELPER_NOT_FOUND) || stderr.contains(HELPER_NOT_FOUND) {
            return Ok(None);
        }
        let message = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(ClientError::Credentials(format!(
            "Credential helper {}{} failed: {}",
            HELPER_PREFIX,
            helper,
            message.trim()
        )));
    }

    let response: HelperResponse = serde_json::from_slice(stdout).map_err(|e| {
        ClientError::Credentials(format!(
            "Credential helper {}{} returned invalid output: {}",
            HELPER_PREFIX, helper, e
        ))
    })?;

    Ok(Some(Credentials {
        username: response.username,
        password: response.secret,
    }))
}

async fn run_credential_helper(helper: &str, server: &str) -> Result<Option<Credentials>> {
    let program = format!("{}{}", HELPER_PREFIX, helper);
    debug!("Asking {} for {} credentials", program, server);

    let mut child = Command::new(&program)
        .arg("get")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ClientError::Credentials(format!("Failed to run {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(server.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    parse_helper_output(helper, output.status.success(), &output.stdout, &output.stderr)
}

#[derive(Debug, Clone)]
enum Store {
    Dir(Option<PathBuf>),
    Loaded(DockerConfig),
}

/// Resolves the credentials to send along with a request for a reference
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    store: Store,
}

impl CredentialResolver {
    /// Read the store from `dir/config.json` (or `~/.docker/config.json`) at
    /// resolution time.
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        Self {
            store: Store::Dir(dir),
        }
    }

    pub fn from_config(config: DockerConfig) -> Self {
        Self {
            store: Store::Loaded(config),
        }
    }

    /// Resolver that never finds credentials
    pub fn anonymous() -> Self {
        Self::from_config(DockerConfig::default())
    }

    pub async fn resolve(&self, reference: &str) -> Result<RegistryAuth> {
        let name = RepositoryName::parse(reference)?;

        let loaded;
        let config = match &self.store {
            Store::Dir(dir) => {
                loaded = DockerConfig::load(dir.as_deref())?;
                &loaded
            }
            Store::Loaded(config) => config,
        };

        let from_helper = match config.credential_helper(&name) {
            Some(helper) => {
                let found = run_credential_helper(helper, name.credential_server()).await?;
                if found.is_none() {
                    debug!("No entry in {}{}, checking auths", HELPER_PREFIX, helper);
                }
                found
            }
            None => None,
        };

        let credentials = match from_helper {
            Some(creds) => Some(creds),
            None => config.stored_credentials(&name.registry)?,
        };

        match credentials {
            Some(creds) => {
                debug!("Using stored credentials for {}", name.registry);
                Ok(RegistryAuth::Credentials(AuthConfig::new(
                    format!("https://{}", name.registry),
                    creds.username,
                    creds.password,
                )))
            }
            None => {
                debug!("No credentials found for {}", name.registry);
                Ok(RegistryAuth::Anonymous)
            }
        }
    }
}
