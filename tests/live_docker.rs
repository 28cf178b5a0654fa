//! Exercises the real, subprocess-backed default providers against a live
//! Docker daemon. Ignored by default — run with `cargo test -- --ignored`
//! on a machine with `docker` on `PATH` and the daemon running, mirroring
//! how the teacher gates its own daemon-dependent tests.

use std::sync::Arc;

use stagecraft::engine::clients::ClientsBundle;
use stagecraft::engine::config::{ContainerSpec, NetworkSpec};
use stagecraft::engine::logger::Logger;
use stagecraft::{providers, NetworkId, NetworkManager};

#[tokio::test]
#[ignore]
async fn network_provider_creates_and_removes_a_real_docker_network() {
    let clients = Arc::new(ClientsBundle::new().await.unwrap());
    let spec = NetworkSpec {
        name: "stagecraft-test-net".to_string(),
        driver: None,
    };
    let provider = providers::network::new(spec, Arc::clone(&clients), Logger::default());

    provider.create().await.unwrap();
    let network_id = NetworkId::new("stagecraft-test-net").unwrap();
    let exists = NetworkManager::new(&clients.docker)
        .exists(&network_id)
        .await
        .unwrap();
    assert!(exists);

    provider.destroy().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn container_provider_pulls_and_runs_a_real_container() {
    let clients = Arc::new(ClientsBundle::new().await.unwrap());
    let spec = ContainerSpec {
        name: "stagecraft-test-web".to_string(),
        image: "alpine:latest".to_string(),
        networks: vec![],
        environment: vec![],
        published_port: None,
    };
    let provider = providers::container::new(spec, Arc::clone(&clients), Logger::default());

    provider.create().await.unwrap();
    provider.destroy().await.unwrap();
}
