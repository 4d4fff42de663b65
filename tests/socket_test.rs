mod common;

use std::path::PathBuf;

use tonic::Status;

use common::{FakeManager, serve};
use uor_sample_client::commands::{self, PullOptions, PushOptions};
use uor_sample_client::{
    AttributeMap, AttributeTable, ClientError, CollectionManager, CredentialResolver,
    UnixSocketClient,
};

#[tokio::test]
async fn test_pull_over_unix_socket() {
    let manager = FakeManager::with_digests(&["sha256:aaa", "sha256:bbb"]);
    let retrieved = manager.retrieved.clone();
    let server = serve(manager);

    let client = UnixSocketClient::new(&server.socket);
    let output = commands::pull(
        &client,
        &CredentialResolver::anonymous(),
        PullOptions {
            reference: "localhost:5000/image:latest".to_string(),
            workspace: PathBuf::from("out"),
            attributes: AttributeMap::new(),
        },
    )
    .await
    .unwrap();

    assert_eq!(output.as_deref(), Some("sha256:aaa\nsha256:bbb"));

    let requests = retrieved.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].source, "localhost:5000/image:latest");
    assert!(requests[0].auth.is_none());
}

#[tokio::test]
async fn test_push_over_unix_socket() {
    let manager = FakeManager::with_publish_digest("sha256:ccc");
    let published = manager.published.clone();
    let server = serve(manager);

    let client = UnixSocketClient::new(&server.socket);
    let digest = commands::push(
        &client,
        &CredentialResolver::anonymous(),
        &AttributeTable::default(),
        PushOptions {
            workspace: PathBuf::from("ws"),
            reference: "localhost:5000/image:latest".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(digest, "sha256:ccc");

    let requests = published.lock().unwrap();
    let collection = requests[0].collection.as_ref().unwrap();
    assert_eq!(collection.files.len(), 2);
}

#[tokio::test]
async fn test_client_can_call_repeatedly() {
    let server = serve(FakeManager::with_digests(&["d1"]));
    let client = UnixSocketClient::new(&server.socket);

    for _ in 0..3 {
        let response = client
            .retrieve_content(Default::default())
            .await
            .unwrap();
        assert_eq!(response.digests, vec!["d1".to_string()]);
    }
}

#[tokio::test]
async fn test_server_error_propagates() {
    let server = serve(FakeManager::failing(Status::not_found("collection not found")));
    let client = UnixSocketClient::new(&server.socket);

    let err = commands::push(
        &client,
        &CredentialResolver::anonymous(),
        &AttributeTable::default(),
        PushOptions {
            workspace: PathBuf::from("ws"),
            reference: "localhost:5000/missing:latest".to_string(),
        },
    )
    .await
    .unwrap_err();

    match err {
        ClientError::Rpc(status) => {
            assert_eq!(status.code(), tonic::Code::NotFound);
            assert_eq!(status.message(), "collection not found");
        }
        other => panic!("expected rpc error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_socket_fails_pull() {
    let dir = tempfile::tempdir().unwrap();
    let client = UnixSocketClient::new(dir.path().join("nobody-home.sock"));

    let err = commands::pull(
        &client,
        &CredentialResolver::anonymous(),
        PullOptions {
            reference: "localhost:5000/image:latest".to_string(),
            workspace: PathBuf::from("out"),
            attributes: AttributeMap::new(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }));
}
