//! Default `Helm` provider: installs/uninstalls a release targeting a named
//! `Cluster` via the `helm` CLI.

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::clients::ClientsBundle;
use crate::engine::config::HelmSpec;
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;

struct HelmProvider {
    spec: HelmSpec,
    clients: Arc<ClientsBundle>,
    logger: Logger,
}

#[async_trait]
impl Provider for HelmProvider {
    async fn create(&self) -> Result<(), String> {
        let mut args = vec![
            "install".to_string(),
            self.spec.name.clone(),
            self.spec.chart.clone(),
            "--kube-context".to_string(),
            format!("k3d-{}", self.spec.cluster),
        ];
        for (key, value) in &self.spec.values {
            args.push("--set".to_string());
            args.push(format!("{key}={value}"));
        }
        self.clients.helm.run(&args).await?;
        self.logger.info(&format!("installed release {}", self.spec.name));
        Ok(())
    }

    async fn destroy(&self) -> Result<(), String> {
        let args = vec![
            "uninstall".to_string(),
            self.spec.name.clone(),
            "--kube-context".to_string(),
            format!("k3d-{}", self.spec.cluster),
        ];
        self.clients.helm.run(&args).await?;
        self.logger.info(&format!("uninstalled release {}", self.spec.name));
        Ok(())
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::Helm(self.spec.clone())
    }
}

/// Build the default `Helm` provider for `spec`.
pub fn new(spec: HelmSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    Arc::new(HelmProvider {
        spec,
        clients,
        logger,
    })
}
