//! UOR Sample Client Library
//!
//! A small client for the UOR collection manager. It publishes workspace
//! content as collections and retrieves collection content into workspaces by
//! making single gRPC calls over a local Unix domain socket, passing along any
//! registry credentials found in the local Docker configuration.

pub mod cli;
pub mod collection;
pub mod commands;
pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod registry;

pub use collection::{AttributeMap, AttributeTable, AttributeValue, Collection, FileAttributeRule};
pub use config::{AuthConfig, ClientConfig, RegistryAuth};
pub use error::{ClientError, Result};
pub use manager::{CollectionManager, UnixSocketClient};
pub use registry::CredentialResolver;
