use super::{errors::HandlerError, not_found_or_kube, parse_body, HandlerInner};
use crate::{kubernetes::is_not_found, types::DeleteFunctionRequest};

impl HandlerInner {
    pub(super) async fn delete(
        &self,
        namespace: Option<&str>,
        body: &[u8],
    ) -> Result<(), HandlerError> {
        let request: DeleteFunctionRequest = parse_body(body)?;
        if request.function_name.is_empty() {
            return Err(HandlerError::BadRequest(String::from(
                "functionName is required",
            )));
        }

        let namespace = self.policy.effective(namespace)?;
        let name = request.function_name.as_str();

        tracing::info!(%name, %namespace, "Deleting function.");

        self.client
            .delete_deployment(&namespace, name)
            .await
            .map_err(|error| not_found_or_kube(error, name, &namespace))?;

        tracing::info!(%name, "Deleted deployment.");

        match self.client.delete_service(&namespace, name).await {
            Ok(()) => tracing::info!(%name, "Deleted service."),
            Err(error) if is_not_found(&error) => tracing::debug!(%name, "Service already gone."),
            Err(error) => {
                tracing::error!(%error, "Failed to delete service.");
                return Err(HandlerError::Kube(error));
            }
        }

        match self.client.delete_function(&namespace, name).await {
            Ok(()) => tracing::info!(%name, "Deleted function record."),
            Err(error) if is_not_found(&error) => {
                tracing::debug!(%name, "Function record already gone.")
            }
            Err(error) => {
                tracing::error!(%error, "Failed to delete function record.");
                return Err(HandlerError::Kube(error));
            }
        }

        Ok(())
    }
}
