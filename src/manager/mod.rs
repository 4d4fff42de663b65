//! Collection manager gRPC interface
//!
//! The generated stubs live in [`proto`]. Commands talk to the manager through
//! the [`CollectionManager`] trait; [`UnixSocketClient`] is the implementation
//! that dials the manager's Unix domain socket.

pub mod client;

pub use client::UnixSocketClient;

use async_trait::async_trait;

use crate::error::Result;

/// Generated protobuf messages and gRPC stubs
pub mod proto {
    tonic::include_proto!("uor.collectionmanager.v1alpha1");
}

pub type RetrieveRequest = proto::retrieve::Request;
pub type RetrieveResponse = proto::retrieve::Response;
pub type PublishRequest = proto::publish::Request;
pub type PublishResponse = proto::publish::Response;

/// The two calls the client makes against a collection manager.
///
/// Each call is a single request/response exchange. Implementations must not
/// retry.
#[async_trait]
pub trait CollectionManager: Send + Sync {
    async fn retrieve_content(&self, request: RetrieveRequest) -> Result<RetrieveResponse>;

    async fn publish_content(&self, request: PublishRequest) -> Result<PublishResponse>;
}
