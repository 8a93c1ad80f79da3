use super::{errors::HandlerError, parse_body, HandlerInner};
use crate::{namespace::split_function_name, types::ScaleServiceRequest};

impl HandlerInner {
    /// Overwrites the desired replica count of a function's deployment.
    pub(super) async fn scale(
        &self,
        name: &str,
        namespace: Option<&str>,
        body: &[u8],
    ) -> Result<(), HandlerError> {
        let namespace = self.policy.resolve(namespace);
        let (name, namespace) = split_function_name(name, &namespace);
        self.policy.guard(&namespace)?;

        let request: ScaleServiceRequest = parse_body(body)?;
        let replicas = i32::try_from(request.replicas).map_err(|_| {
            HandlerError::BadRequest(format!("replicas {} out of range", request.replicas))
        })?;

        tracing::info!(%name, %namespace, replicas, "Scaling function.");

        let mut deployment = self
            .client
            .get_deployment(&namespace, &name)
            .await
            .map_err(|error| {
                tracing::error!(%error, "Failed to get deployment.");
                HandlerError::Kube(error)
            })?;

        deployment.spec.get_or_insert_with(Default::default).replicas = Some(replicas);

        self.client
            .replace_deployment(&namespace, &name, &deployment)
            .await
            .map_err(|error| {
                tracing::error!(%error, "Failed to scale deployment.");
                HandlerError::Kube(error)
            })?;

        tracing::info!(%name, replicas, "Scaled function.");

        Ok(())
    }
}
