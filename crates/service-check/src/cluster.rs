//! Cluster API collaborator: listing services and their backing pods.

use std::path::PathBuf;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Service};
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use thiserror::Error;
use tracing::debug;

use crate::types::{PodRecord, ServiceRecord};

/// Errors from the cluster API. A failure while listing services is fatal
/// for the run; a failure while looking up pods is recovered per service.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Cluster configuration error: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    #[error("{0}")]
    Transport(String),
}

/// Connection parameters, passed through to client construction unmodified.
#[derive(Debug, Clone, Default)]
pub struct ClusterConfig {
    /// Explicit kubeconfig file; when unset the standard inference chain
    /// applies (in-cluster environment, then the local kubeconfig).
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the current one.
    pub context: Option<String>,
}

/// The cluster operations the evaluation pipeline consumes.
#[async_trait]
pub trait ClusterApi {
    /// List all services visible to the client, across namespaces.
    async fn list_services(&self) -> Result<Vec<ServiceRecord>, ClusterError>;

    /// List the pods matching `label_selector`.
    async fn list_pods(&self, label_selector: &str) -> Result<Vec<PodRecord>, ClusterError>;
}

/// `kube`-backed implementation of [`ClusterApi`].
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Connect using the given parameters.
    pub async fn connect(config: &ClusterConfig) -> Result<Self, ClusterError> {
        let client_config = match &config.kubeconfig {
            Some(path) => {
                debug!(path = %path.display(), "Loading explicit kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path)?;
                let options = KubeConfigOptions {
                    context: config.context.clone(),
                    ..KubeConfigOptions::default()
                };
                Config::from_custom_kubeconfig(kubeconfig, &options).await?
            }
            None => Config::infer().await?,
        };
        let client = Client::try_from(client_config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn list_services(&self) -> Result<Vec<ServiceRecord>, ClusterError> {
        let services: Api<Service> = Api::all(self.client.clone());
        let list = services.list(&ListParams::default()).await?;
        debug!(count = list.items.len(), "Listed services");
        Ok(list.items.iter().map(ServiceRecord::from).collect())
    }

    async fn list_pods(&self, label_selector: &str) -> Result<Vec<PodRecord>, ClusterError> {
        let pods: Api<Pod> = Api::all(self.client.clone());
        let lp = ListParams::default().labels(label_selector);
        let list = pods.list(&lp).await?;
        debug!(
            selector = %label_selector,
            count = list.items.len(),
            "Listed pods for selector"
        );
        Ok(list.items.iter().map(PodRecord::from).collect())
    }
}
