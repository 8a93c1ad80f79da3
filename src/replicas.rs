use crate::consts::FUNCTION_IDENTITY_LABEL;
use futures::StreamExt;
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    runtime::{
        reflector::{self, ObjectRef, Store},
        watcher, WatchStreamExt,
    },
    Api, Client as KubeClient,
};
use std::sync::Arc;
use thiserror::Error as ThisError;

/// Read access to a cached view of deployments.
pub trait DeploymentLister: Send + Sync {
    fn get(&self, namespace: &str, name: &str) -> Option<Arc<Deployment>>;
}

impl DeploymentLister for Store<Deployment> {
    fn get(&self, namespace: &str, name: &str) -> Option<Arc<Deployment>> {
        Store::get(self, &ObjectRef::new(name).within(namespace))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionReplicas {
    pub desired: u64,
    pub available: u64,
}

impl From<&Deployment> for FunctionReplicas {
    fn from(value: &Deployment) -> Self {
        let desired = value
            .spec
            .as_ref()
            .and_then(|spec| spec.replicas)
            .unwrap_or_default();
        let available = value
            .status
            .as_ref()
            .and_then(|status| status.available_replicas)
            .unwrap_or_default();

        Self {
            desired: u64::try_from(desired).unwrap_or_default(),
            available: u64::try_from(available).unwrap_or_default(),
        }
    }
}

#[derive(ThisError, Debug, PartialEq)]
#[error("deployment {namespace}/{name} not found in cache")]
pub struct ReplicaReadError {
    pub name: String,
    pub namespace: String,
}

/// Reads replica counts from the deployment cache.
///
/// The cache is kept current by a watch and may lag behind the cluster, a
/// scale request can take a moment to show up here. Reads never wait for it.
#[derive(Clone)]
pub struct ReplicaReader {
    lister: Arc<dyn DeploymentLister>,
}

impl ReplicaReader {
    pub fn new(lister: Arc<dyn DeploymentLister>) -> Self {
        Self { lister }
    }

    pub fn read(&self, name: &str, namespace: &str) -> Result<FunctionReplicas, ReplicaReadError> {
        self.lister
            .get(namespace, name)
            .map(|deployment| FunctionReplicas::from(deployment.as_ref()))
            .ok_or_else(|| ReplicaReadError {
                name: name.to_string(),
                namespace: namespace.to_string(),
            })
    }

    /// Zero replicas on a miss, so one missing deployment does not fail a whole listing.
    pub fn read_or_default(&self, name: &str, namespace: &str) -> FunctionReplicas {
        self.read(name, namespace).unwrap_or_else(|error| {
            tracing::warn!(%error, "Function replica reader error.");
            FunctionReplicas::default()
        })
    }
}

/// Starts watching function deployments in all namespaces and returns the store they land in.
pub fn spawn_deployment_reflector(client: KubeClient) -> Store<Deployment> {
    let api: Api<Deployment> = Api::all(client);
    let config = watcher::Config::default().labels(FUNCTION_IDENTITY_LABEL);
    let (reader, writer) = reflector::store();

    let stream = reflector::reflector(writer, watcher(api, config))
        .default_backoff()
        .touched_objects();

    tokio::spawn(async move {
        tracing::info!("Watching function deployments.");

        stream
            .for_each(|result| async move {
                if let Err(error) = result {
                    tracing::warn!(%error, "Deployment watch error.");
                }
            })
            .await;

        tracing::info!("Deployment watch terminated.");
    });

    reader
}
