//! Default `Container` provider: pulls the image, creates, and starts a
//! container via the teacher's [`crate::container::ContainerBuilder`] /
//! [`crate::container::ContainerManager`] and [`crate::image::ImageManager`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::container::{ContainerBuilder, RemoveOptions};
use crate::engine::clients::ClientsBundle;
use crate::engine::config::ContainerSpec;
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;
use crate::image::{ImageRef, PullOptions};
use crate::types::{ContainerId, NetworkId};

pub(crate) struct ContainerProvider {
    pub(crate) spec: ContainerSpec,
    pub(crate) clients: Arc<ClientsBundle>,
    pub(crate) logger: Logger,
}

impl ContainerProvider {
    pub(crate) async fn create_container(&self) -> Result<(), String> {
        let image_ref = ImageRef::parse(&self.spec.image).map_err(|e| e.to_string())?;
        let images = self.clients.docker.images();
        if !images.exists(&image_ref).await.map_err(|e| e.to_string())? {
            images
                .pull(&image_ref, PullOptions::default())
                .await
                .map_err(|e| e.to_string())?;
        }

        let mut builder = ContainerBuilder::new(self.spec.image.clone()).name(self.spec.name.clone());
        for (key, value) in &self.spec.environment {
            builder = builder.env(key.clone(), value.clone());
        }
        for network in &self.spec.networks {
            let network_id = NetworkId::new(network.clone()).map_err(|e| e.to_string())?;
            builder = builder.network(network_id);
        }
        if let Some(port) = self.spec.published_port {
            builder = builder.port(port, port);
        }

        builder
            .run(&self.clients.docker)
            .await
            .map_err(|e| e.to_string())?;
        self.logger.info(&format!("started container {}", self.spec.name));
        Ok(())
    }

    pub(crate) async fn destroy_container(&self, name: &str) -> Result<(), String> {
        let manager = self.clients.docker.containers();
        let id = ContainerId::new_unchecked(name.to_string());
        manager
            .stop(&id, None)
            .await
            .map_err(|e| e.to_string())?;
        manager
            .remove(
                &id,
                RemoveOptions {
                    force: true,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[async_trait]
impl Provider for ContainerProvider {
    async fn create(&self) -> Result<(), String> {
        self.create_container().await
    }

    async fn destroy(&self) -> Result<(), String> {
        self.destroy_container(&self.spec.name).await
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::Container(self.spec.clone())
    }
}

/// Build the default `Container` provider for `spec`.
pub fn new(spec: ContainerSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    Arc::new(ContainerProvider {
        spec,
        clients,
        logger,
    })
}
