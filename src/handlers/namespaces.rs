use super::{errors::HandlerError, HandlerInner};
use crate::consts::FUNCTIONS_NAMESPACE_ANNOTATION;
use k8s_openapi::api::core::v1::Namespace;
use std::collections::BTreeSet;

fn is_functions_namespace(namespace: &Namespace) -> bool {
    namespace
        .metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(FUNCTIONS_NAMESPACE_ANNOTATION))
        .is_some_and(|value| value == "1")
}

impl HandlerInner {
    /// Namespaces functions may be deployed to: the default one plus every
    /// namespace annotated `openfaas: "1"`, never the reserved one. Sorted.
    pub(super) async fn list_namespaces(&self) -> Result<Vec<String>, HandlerError> {
        let namespaces = self.client.list_namespaces().await.map_err(|error| {
            tracing::error!(%error, "Failed to list namespaces.");
            HandlerError::Kube(error)
        })?;

        let mut names: BTreeSet<String> = namespaces
            .iter()
            .filter(|namespace| is_functions_namespace(namespace))
            .filter_map(|namespace| namespace.metadata.name.clone())
            .collect();
        names.insert(self.policy.resolve(None));

        Ok(names
            .into_iter()
            .filter(|name| self.policy.guard(name).is_ok())
            .collect())
    }
}
