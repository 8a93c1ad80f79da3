use super::defs::{Function, FunctionSpec};
use crate::{
    replicas::FunctionReplicas,
    types::{FunctionDeployment, FunctionStatus},
};
use kube::core::ObjectMeta;

impl From<&FunctionDeployment> for FunctionSpec {
    fn from(value: &FunctionDeployment) -> Self {
        FunctionSpec {
            name: value.service.clone(),
            image: value.image.clone(),
            handler: value.env_process.clone(),
            annotations: value.annotations.clone(),
            labels: value.labels.clone(),
            environment: value.env_vars.clone(),
            constraints: value.constraints.clone(),
            secrets: value.secrets.clone(),
            limits: value.limits.clone(),
            requests: value.requests.clone(),
            read_only_root_filesystem: value.read_only_root_filesystem.unwrap_or(false),
        }
    }
}

impl Function {
    /// A fresh record for a function about to be deployed into `namespace`.
    pub fn from_deployment(function_deployment: &FunctionDeployment, namespace: &str) -> Self {
        Function {
            metadata: ObjectMeta {
                name: Some(function_deployment.service.clone()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            spec: FunctionSpec::from(function_deployment),
        }
    }

    pub fn to_status(&self, namespace: &str, replicas: FunctionReplicas) -> FunctionStatus {
        FunctionStatus {
            name: self.spec.name.clone(),
            image: self.spec.image.clone(),
            namespace: namespace.to_string(),
            env_process: self.spec.handler.clone(),
            labels: self.spec.labels.clone(),
            annotations: self.spec.annotations.clone(),
            replicas: replicas.desired,
            available_replicas: replicas.available,
        }
    }
}
