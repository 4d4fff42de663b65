//! In-process fake collection manager bound to a temporary Unix socket

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tokio::net::UnixListener;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnixListenerStream;
use tonic::{Request, Response, Status};

use uor_sample_client::manager::proto::collection_manager_server::{
    CollectionManager as CollectionManagerService, CollectionManagerServer,
};
use uor_sample_client::manager::{
    PublishRequest, PublishResponse, RetrieveRequest, RetrieveResponse,
};

/// Scripted answers plus a record of every request received
#[derive(Clone, Default)]
pub struct FakeManager {
    pub digests: Vec<String>,
    pub publish_digest: String,
    pub failure: Option<Status>,
    pub retrieved: Arc<Mutex<Vec<RetrieveRequest>>>,
    pub published: Arc<Mutex<Vec<PublishRequest>>>,
}

impl FakeManager {
    pub fn with_digests(digests: &[&str]) -> Self {
        Self {
            digests: digests.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_publish_digest(digest: &str) -> Self {
        Self {
            publish_digest: digest.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(status: Status) -> Self {
        Self {
            failure: Some(status),
            ..Default::default()
        }
    }
}

#[tonic::async_trait]
impl CollectionManagerService for FakeManager {
    async fn publish_content(
        &self,
        request: Request<PublishRequest>,
    ) -> Result<Response<PublishResponse>, Status> {
        self.published.lock().unwrap().push(request.into_inner());
        if let Some(status) = &self.failure {
            return Err(status.clone());
        }
        Ok(Response::new(PublishResponse {
            digest: self.publish_digest.clone(),
        }))
    }

    async fn retrieve_content(
        &self,
        request: Request<RetrieveRequest>,
    ) -> Result<Response<RetrieveResponse>, Status> {
        self.retrieved.lock().unwrap().push(request.into_inner());
        if let Some(status) = &self.failure {
            return Err(status.clone());
        }
        Ok(Response::new(RetrieveResponse {
            digests: self.digests.clone(),
        }))
    }
}

/// Running fake server; stops when dropped
pub struct FakeServer {
    pub socket: PathBuf,
    _dir: TempDir,
    handle: JoinHandle<()>,
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn serve(manager: FakeManager) -> FakeServer {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("uor.sock");
    let listener = UnixListener::bind(&socket).unwrap();
    let incoming = UnixListenerStream::new(listener);

    let handle = tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(CollectionManagerServer::new(manager))
            .serve_with_incoming(incoming)
            .await
            .unwrap();
    });

    FakeServer {
        socket,
        _dir: dir,
        handle,
    }
}
