//! Default `Ingress` provider: a proxy container routing external traffic to
//! a backend resource, built on the same `ContainerManager` as
//! [`crate::providers::container`] with the backend name threaded into the
//! proxy container's environment.

use std::sync::Arc;

use async_trait::async_trait;

use super::container::ContainerProvider;
use crate::engine::clients::ClientsBundle;
use crate::engine::config::{ContainerSpec, IngressSpec};
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;

struct IngressProvider {
    spec: IngressSpec,
    inner: ContainerProvider,
}

#[async_trait]
impl Provider for IngressProvider {
    async fn create(&self) -> Result<(), String> {
        self.inner.create_container().await
    }

    async fn destroy(&self) -> Result<(), String> {
        self.inner.destroy_container(&self.spec.name).await
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::Ingress(self.spec.clone())
    }
}

/// Build the default `Ingress` provider for `spec`.
pub fn new(spec: IngressSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    let container_spec = ContainerSpec {
        name: spec.name.clone(),
        image: spec.image.clone(),
        networks: vec![spec.network.clone()],
        environment: vec![("BACKEND".to_string(), spec.backend.clone())],
        published_port: None,
    };
    Arc::new(IngressProvider {
        spec,
        inner: ContainerProvider {
            spec: container_spec,
            clients,
            logger,
        },
    })
}
