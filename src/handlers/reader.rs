use super::{errors::HandlerError, not_found_or_kube, HandlerInner};
use crate::{namespace::split_function_name, types::FunctionStatus};

impl HandlerInner {
    pub(super) async fn get(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<FunctionStatus, HandlerError> {
        let namespace = self.policy.resolve(namespace);
        let (name, namespace) = split_function_name(name, &namespace);
        self.policy.guard(&namespace)?;

        let function = self
            .client
            .get_function(&namespace, &name)
            .await
            .map_err(|error| not_found_or_kube(error, &name, &namespace))?;

        let replicas = self.replicas.read_or_default(&name, &namespace);

        Ok(function.to_status(&namespace, replicas))
    }

    pub(super) async fn list(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<FunctionStatus>, HandlerError> {
        let namespace = self.policy.effective(namespace)?;

        let functions = self
            .client
            .list_functions(&namespace)
            .await
            .map_err(|error| {
                tracing::error!(%error, %namespace, "Failed to list functions.");
                HandlerError::List(error)
            })?;

        tracing::debug!(%namespace, count = functions.len(), "Listed functions.");

        let statuses = functions
            .iter()
            .map(|function| {
                let replicas = self.replicas.read_or_default(&function.spec.name, &namespace);
                function.to_status(&namespace, replicas)
            })
            .collect();

        Ok(statuses)
    }
}
