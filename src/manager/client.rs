//! Unix domain socket transport for the collection manager

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hyper_util::rt::TokioIo;
use tokio::net::UnixStream;
use tonic::transport::{Channel, Endpoint, Uri};
use tower::service_fn;
use tracing::debug;

use super::proto::collection_manager_client::CollectionManagerClient;
use super::{CollectionManager, PublishRequest, PublishResponse, RetrieveRequest, RetrieveResponse};
use crate::error::{ClientError, Result};

// tonic requires an http URI for the endpoint; it is never resolved because
// the connector below dials the socket directly
const PLACEHOLDER_URI: &str = "http://[::]:50051";

/// Collection manager client that opens a fresh channel for every call.
///
/// The channel is dropped when the call returns, on success and on error.
#[derive(Debug, Clone)]
pub struct UnixSocketClient {
    socket_path: PathBuf,
}

impl UnixSocketClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    async fn connect(&self) -> Result<CollectionManagerClient<Channel>> {
        debug!(
            "Connecting to collection manager at unix://{}",
            self.socket_path.display()
        );

        let path = self.socket_path.clone();
        let channel = Endpoint::from_static(PLACEHOLDER_URI)
            .connect_with_connector(service_fn(move |_: Uri| {
                let path = path.clone();
                async move { Ok::<_, std::io::Error>(TokioIo::new(UnixStream::connect(path).await?)) }
            }))
            .await
            .map_err(|source| ClientError::Transport {
                path: self.socket_path.clone(),
                source,
            })?;

        Ok(CollectionManagerClient::new(channel))
    }
}

#[async_trait]
impl CollectionManager for UnixSocketClient {
    async fn retrieve_content(&self, request: RetrieveRequest) -> Result<RetrieveResponse> {
        let mut client = self.connect().await?;
        let response = client.retrieve_content(request).await?;
        Ok(response.into_inner())
    }

    async fn publish_content(&self, request: PublishRequest) -> Result<PublishResponse> {
        let mut client = self.connect().await?;
        let response = client.publish_content(request).await?;
        Ok(response.into_inner())
    }
}
