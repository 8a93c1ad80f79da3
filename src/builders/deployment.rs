use super::{
    constraints::constraints_to_node_selector,
    env::{env_vars, image_pull_secrets},
    merge_labels, DeploymentConfig,
};
use crate::{
    consts::{
        FUNCTION_IDENTITY_LABEL, INITIAL_REPLICAS, LOCK_FILE_PATH, NON_ROOT_USER_ID,
        REVISION_HISTORY_LIMIT, TMP_DIR,
    },
    types::{FunctionDeployment, FunctionResources},
};
use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec, DeploymentStrategy, RollingUpdateDeployment},
        core::v1::{
            Container, ContainerPort, EnvVar, ExecAction, LocalObjectReference, PodSpec,
            PodTemplateSpec, Probe, ResourceRequirements, SecurityContext, Volume, VolumeMount,
        },
    },
    apimachinery::pkg::{
        api::resource::Quantity, apis::meta::v1::LabelSelector, util::intstr::IntOrString,
    },
};
use kube::core::ObjectMeta;
use std::collections::BTreeMap;

/// Builds the deployment of a function.
///
/// ```text
/// let builder = DeploymentBuilder::new(&request, "openfaas-fn", &config);
/// let deployment = Deployment::from(&builder);
/// ```
pub struct DeploymentBuilder<'a> {
    function: &'a FunctionDeployment,
    namespace: &'a str,
    config: &'a DeploymentConfig,
}

impl<'a> DeploymentBuilder<'a> {
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

    fn to_name(&self) -> String {
        self.function.service.clone()
    }

    fn to_identity_labels(&self) -> BTreeMap<String, String> {
        [(String::from(FUNCTION_IDENTITY_LABEL), self.to_name())].into()
    }

    fn to_template_labels(&self) -> BTreeMap<String, String> {
        merge_labels(self.to_identity_labels(), self.function.labels.as_ref())
    }

    fn to_annotations(&self) -> Option<BTreeMap<String, String>> {
        self.function.annotations.clone()
    }

    fn should_create_tmp_volume(&self) -> bool {
        self.function.read_only_root_filesystem.unwrap_or(false)
    }

    fn to_tmp_volume_name(&self) -> String {
        String::from("tmp")
    }

    fn to_metadata(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.to_name()),
            namespace: Some(self.namespace.to_string()),
            labels: Some(self.to_identity_labels()),
            annotations: self.to_annotations(),
            ..Default::default()
        }
    }

    fn to_template_metadata(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.to_name()),
            labels: Some(self.to_template_labels()),
            annotations: self.to_annotations(),
            ..Default::default()
        }
    }

    fn to_node_selector(&self) -> Option<BTreeMap<String, String>> {
        let selector = constraints_to_node_selector(
            self.function.constraints.as_deref().unwrap_or_default(),
        );

        (!selector.is_empty()).then_some(selector)
    }

    fn to_image_pull_secrets(&self) -> Option<Vec<LocalObjectReference>> {
        let secrets = image_pull_secrets(self.function.secrets.as_deref().unwrap_or_default());

        (!secrets.is_empty()).then_some(secrets)
    }

    fn to_env(&self) -> Option<Vec<EnvVar>> {
        let vars = env_vars(
            self.function.env_process.as_deref(),
            self.function.env_vars.as_ref(),
        );

        (!vars.is_empty()).then_some(vars)
    }

    fn to_liveness_probe(&self) -> Option<Probe> {
        if !self.config.enable_liveness_probe {
            return None;
        }

        Some(Probe {
            exec: Some(ExecAction {
                command: Some(vec![String::from("cat"), String::from(LOCK_FILE_PATH)]),
            }),
            initial_delay_seconds: Some(3),
            timeout_seconds: Some(1),
            period_seconds: Some(10),
            success_threshold: Some(1),
            failure_threshold: Some(3),
            ..Default::default()
        })
    }

    fn to_resources(&self) -> Option<ResourceRequirements> {
        let limits = self.function.limits.as_ref().map(to_quantities);
        let requests = self.function.requests.as_ref().map(to_quantities);

        if limits.is_none() && requests.is_none() {
            return None;
        }

        Some(ResourceRequirements {
            limits,
            requests,
            ..Default::default()
        })
    }

    fn to_run_as_user(&self) -> Option<i64> {
        self.config.set_non_root_user.then_some(NON_ROOT_USER_ID)
    }

    fn to_security_context(&self) -> Option<SecurityContext> {
        let read_only_root_filesystem = self.function.read_only_root_filesystem;
        let run_as_user = self.to_run_as_user();

        if read_only_root_filesystem.is_none() && run_as_user.is_none() {
            return None;
        }

        Some(SecurityContext {
            read_only_root_filesystem,
            run_as_user,
            ..Default::default()
        })
    }

    fn to_volumes(&self) -> Option<Vec<Volume>> {
        self.should_create_tmp_volume().then(|| {
            vec![Volume {
                name: self.to_tmp_volume_name(),
                empty_dir: Some(Default::default()),
                ..Default::default()
            }]
        })
    }

    fn to_volume_mounts(&self) -> Option<Vec<VolumeMount>> {
        self.should_create_tmp_volume().then(|| {
            vec![VolumeMount {
                name: self.to_tmp_volume_name(),
                mount_path: String::from(TMP_DIR),
                ..Default::default()
            }]
        })
    }
}

fn to_quantities(resources: &FunctionResources) -> BTreeMap<String, Quantity> {
    let mut quantities = BTreeMap::new();

    if let Some(cpu) = &resources.cpu {
        quantities.insert(String::from("cpu"), Quantity(cpu.clone()));
    }
    if let Some(memory) = &resources.memory {
        quantities.insert(String::from("memory"), Quantity(memory.clone()));
    }

    quantities
}

impl From<&DeploymentBuilder<'_>> for Container {
    fn from(value: &DeploymentBuilder<'_>) -> Self {
        Container {
            name: value.to_name(),
            image: Some(value.function.image.clone()),
            ports: Some(vec![ContainerPort {
                container_port: value.config.runtime_http_port,
                protocol: Some(String::from("TCP")),
                ..Default::default()
            }]),
            env: value.to_env(),
            resources: value.to_resources(),
            image_pull_policy: Some(value.config.image_pull_policy.to_string()),
            liveness_probe: value.to_liveness_probe(),
            security_context: value.to_security_context(),
            volume_mounts: value.to_volume_mounts(),
            ..Default::default()
        }
    }
}

impl From<&DeploymentBuilder<'_>> for PodSpec {
    fn from(value: &DeploymentBuilder<'_>) -> Self {
        PodSpec {
            node_selector: value.to_node_selector(),
            image_pull_secrets: value.to_image_pull_secrets(),
            containers: vec![Container::from(value)],
            volumes: value.to_volumes(),
            restart_policy: Some(String::from("Always")),
            dns_policy: Some(String::from("ClusterFirst")),
            ..Default::default()
        }
    }
}

impl From<&DeploymentBuilder<'_>> for DeploymentStrategy {
    fn from(_value: &DeploymentBuilder<'_>) -> Self {
        DeploymentStrategy {
            type_: Some(String::from("RollingUpdate")),
            rolling_update: Some(RollingUpdateDeployment {
                max_unavailable: Some(IntOrString::Int(0)),
                max_surge: Some(IntOrString::Int(1)),
            }),
        }
    }
}

impl From<&DeploymentBuilder<'_>> for DeploymentSpec {
    fn from(value: &DeploymentBuilder<'_>) -> Self {
        DeploymentSpec {
            replicas: Some(INITIAL_REPLICAS),
            selector: LabelSelector {
                match_labels: Some(value.to_identity_labels()),
                ..Default::default()
            },
            strategy: Some(DeploymentStrategy::from(value)),
            revision_history_limit: Some(REVISION_HISTORY_LIMIT),
            template: PodTemplateSpec {
                metadata: Some(value.to_template_metadata()),
                spec: Some(PodSpec::from(value)),
            },
            ..Default::default()
        }
    }
}

/// Generate a fresh deployment
impl From<&DeploymentBuilder<'_>> for Deployment {
    fn from(value: &DeploymentBuilder<'_>) -> Self {
        Deployment {
            metadata: value.to_metadata(),
            spec: Some(DeploymentSpec::from(value)),
            ..Default::default()
        }
    }
}
