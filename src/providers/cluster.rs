//! Default `Cluster` provider: bootstraps/tears down an ephemeral Kubernetes
//! control plane + worker set via the `k3d` CLI, wrapped by
//! [`crate::engine::clients::CommandClient`] — the same subprocess-wrapping
//! idiom the teacher uses for `docker`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::clients::ClientsBundle;
use crate::engine::config::ClusterSpec;
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;

struct ClusterProvider {
    spec: ClusterSpec,
    clients: Arc<ClientsBundle>,
    logger: Logger,
}

#[async_trait]
impl Provider for ClusterProvider {
    async fn create(&self) -> Result<(), String> {
        let args = vec![
            "cluster".to_string(),
            "create".to_string(),
            self.spec.name.clone(),
            "--agents".to_string(),
            self.spec.workers.to_string(),
        ];
        self.clients.k3d.run(&args).await?;
        self.logger.info(&format!("created cluster {}", self.spec.name));
        Ok(())
    }

    async fn destroy(&self) -> Result<(), String> {
        let args = vec!["cluster".to_string(), "delete".to_string(), self.spec.name.clone()];
        self.clients.k3d.run(&args).await?;
        self.logger.info(&format!("deleted cluster {}", self.spec.name));
        Ok(())
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::Cluster(self.spec.clone())
    }
}

/// Build the default `Cluster` provider for `spec`.
pub fn new(spec: ClusterSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    Arc::new(ClusterProvider {
        spec,
        clients,
        logger,
    })
}
