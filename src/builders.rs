//! Pure construction of the Kubernetes objects backing a function.
//!
//! Nothing in here talks to the cluster. The same [`FunctionDeployment`](crate::types::FunctionDeployment)
//! and [`DeploymentConfig`] always produce the same objects.

pub mod constraints;
pub mod deployment;
pub mod env;
pub mod service;

pub use deployment::DeploymentBuilder;
pub use service::ServiceBuilder;

use crate::consts::WATCHDOG_PORT;
use clap::ValueEnum;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImagePullPolicy {
    #[default]
    Always,
    IfNotPresent,
    Never,
}

impl std::fmt::Display for ImagePullPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImagePullPolicy::Always => write!(f, "Always"),
            ImagePullPolicy::IfNotPresent => write!(f, "IfNotPresent"),
            ImagePullPolicy::Never => write!(f, "Never"),
        }
    }
}

/// Settings shared by every function deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentConfig {
    pub runtime_http_port: i32,
    /// Attaches the exec liveness probe to the function container.
    pub enable_liveness_probe: bool,
    pub image_pull_policy: ImagePullPolicy,
    /// Runs function containers as a fixed unprivileged user.
    pub set_non_root_user: bool,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            runtime_http_port: WATCHDOG_PORT,
            enable_liveness_probe: false,
            image_pull_policy: ImagePullPolicy::default(),
            set_non_root_user: false,
        }
    }
}

/// Identity label first, user labels after it. On a key collision the user value wins.
pub fn merge_labels(
    identity: BTreeMap<String, String>,
    user_labels: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut labels = identity;
    if let Some(user_labels) = user_labels {
        labels.extend(user_labels.clone());
    }
    labels
}
