//! Default `Docs` provider: the singleton documentation site, likewise a
//! specialized container built on `ContainerManager`.

use std::sync::Arc;

use async_trait::async_trait;

use super::container::ContainerProvider;
use crate::engine::clients::ClientsBundle;
use crate::engine::config::{ContainerSpec, DocsSpec};
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;

const DOCS_CONTAINER_NAME: &str = "docs";

struct DocsProvider {
    spec: DocsSpec,
    inner: ContainerProvider,
}

#[async_trait]
impl Provider for DocsProvider {
    async fn create(&self) -> Result<(), String> {
        self.inner.create_container().await
    }

    async fn destroy(&self) -> Result<(), String> {
        self.inner.destroy_container(DOCS_CONTAINER_NAME).await
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::Docs(self.spec.clone())
    }
}

/// Build the default `Docs` provider for `spec`.
pub fn new(spec: DocsSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    let container_spec = ContainerSpec {
        name: DOCS_CONTAINER_NAME.to_string(),
        image: spec.image.clone(),
        networks: vec![spec.network.clone()],
        environment: vec![],
        published_port: None,
    };
    Arc::new(DocsProvider {
        spec,
        inner: ContainerProvider {
            spec: container_spec,
            clients,
            logger,
        },
    })
}
