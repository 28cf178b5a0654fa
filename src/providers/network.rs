//! Default `Network` provider: creates/removes a Docker network via the
//! teacher's [`crate::network::NetworkManager`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::clients::ClientsBundle;
use crate::engine::config::NetworkSpec;
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;
use crate::network::NetworkConfig;
use crate::types::NetworkId;

struct NetworkProvider {
    spec: NetworkSpec,
    clients: Arc<ClientsBundle>,
    logger: Logger,
}

#[async_trait]
impl Provider for NetworkProvider {
    async fn create(&self) -> Result<(), String> {
        let manager = self.clients.docker.networks();
        let config = NetworkConfig::new(self.spec.name.clone());
        manager.create(config).await.map_err(|e| e.to_string())?;
        self.logger.info(&format!("created network {}", self.spec.name));
        Ok(())
    }

    async fn destroy(&self) -> Result<(), String> {
        let manager = self.clients.docker.networks();
        let id = NetworkId::new(self.spec.name.clone()).map_err(|e| e.to_string())?;
        manager.remove(&id).await.map_err(|e| e.to_string())?;
        self.logger.info(&format!("removed network {}", self.spec.name));
        Ok(())
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::Network(self.spec.clone())
    }
}

/// Build the default `Network` provider for `spec`.
pub fn new(spec: NetworkSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    Arc::new(NetworkProvider {
        spec,
        clients,
        logger,
    })
}
