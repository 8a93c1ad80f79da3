use super::DeploymentConfig;
use crate::{consts::FUNCTION_IDENTITY_LABEL, types::FunctionDeployment};
use k8s_openapi::{
    api::core::v1::{Service, ServicePort, ServiceSpec},
    apimachinery::pkg::util::intstr::IntOrString,
};
use kube::core::ObjectMeta;
use std::collections::BTreeMap;

/// Builds the ClusterIP service routing to a function's pods.
pub struct ServiceBuilder<'a> {
    function: &'a FunctionDeployment,
    namespace: &'a str,
    config: &'a DeploymentConfig,
}

impl<'a> ServiceBuilder<'a> {
    pub fn new(
        function: &'a FunctionDeployment,
        namespace: &'a str,
        config: &'a DeploymentConfig,
    ) -> Self {
        Self {
            function,
            namespace,
            config,
        }
    }

    fn to_selector(&self) -> BTreeMap<String, String> {
        [(
            String::from(FUNCTION_IDENTITY_LABEL),
            self.function.service.clone(),
        )]
        .into()
    }
}

impl From<&ServiceBuilder<'_>> for ServicePort {
    fn from(value: &ServiceBuilder<'_>) -> Self {
        ServicePort {
            name: Some(String::from("http")),
            protocol: Some(String::from("TCP")),
            port: value.config.runtime_http_port,
            target_port: Some(IntOrString::Int(value.config.runtime_http_port)),
            ..Default::default()
        }
    }
}

/// Generate a fresh service
impl From<&ServiceBuilder<'_>> for Service {
    fn from(value: &ServiceBuilder<'_>) -> Self {
        Service {
            metadata: ObjectMeta {
                name: Some(value.function.service.clone()),
                namespace: Some(value.namespace.to_string()),
                annotations: value.function.annotations.clone(),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                type_: Some(String::from("ClusterIP")),
                selector: Some(value.to_selector()),
                ports: Some(vec![ServicePort::from(value)]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
