//! Default `K8sConfig` provider: applies/deletes a bundle of raw manifests on
//! a named `Cluster` via the `kubectl` CLI.

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::clients::ClientsBundle;
use crate::engine::config::K8sConfigSpec;
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;

struct K8sConfigProvider {
    spec: K8sConfigSpec,
    clients: Arc<ClientsBundle>,
    logger: Logger,
}

impl K8sConfigProvider {
    fn context_args(&self) -> Vec<String> {
        vec![
            "--context".to_string(),
            format!("k3d-{}", self.spec.cluster),
        ]
    }
}

#[async_trait]
impl Provider for K8sConfigProvider {
    async fn create(&self) -> Result<(), String> {
        for manifest in &self.spec.manifests {
            let mut args = vec!["apply".to_string(), "-f".to_string(), manifest.clone()];
            args.extend(self.context_args());
            self.clients.kubectl.run(&args).await?;
        }
        self.logger.info(&format!("applied manifests for {}", self.spec.name));
        Ok(())
    }

    async fn destroy(&self) -> Result<(), String> {
        for manifest in &self.spec.manifests {
            let mut args = vec!["delete".to_string(), "-f".to_string(), manifest.clone()];
            args.extend(self.context_args());
            self.clients.kubectl.run(&args).await?;
        }
        self.logger.info(&format!("deleted manifests for {}", self.spec.name));
        Ok(())
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::K8sConfig(self.spec.clone())
    }
}

/// Build the default `K8sConfig` provider for `spec`.
pub fn new(spec: K8sConfigSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    Arc::new(K8sConfigProvider {
        spec,
        clients,
        logger,
    })
}
