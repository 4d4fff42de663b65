//! Registry reference handling and credential lookup
//!
//! The client never talks to a registry itself. It only works out which
//! registry a reference points at and which locally stored credentials to hand
//! to the collection manager for it.

pub mod auth;
pub mod reference;

pub use crate::config::{AuthConfig, RegistryAuth};
pub use auth::{CredentialResolver, DockerConfig};
pub use reference::RepositoryName;
