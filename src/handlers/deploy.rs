use super::{
    errors::{DeployError, HandlerError},
    parse_body, HandlerInner,
};
use crate::{
    builders::{DeploymentBuilder, ServiceBuilder},
    crds::Function,
    types::FunctionDeployment,
    validation::validate_service_name,
};
use k8s_openapi::api::{apps::v1::Deployment, core::v1::Service};
use kube::Error as KubeError;

impl HandlerInner {
    /// Creates the deployment, the service and the function record, in that order.
    ///
    /// When a step fails the objects created before it are deleted again.
    pub(super) async fn deploy(&self, body: &[u8]) -> Result<(), HandlerError> {
        let request: FunctionDeployment = parse_body(body)?;
        validate_service_name(&request.service)?;
        let namespace = self.policy.effective(request.namespace.as_deref())?;
        let name = request.service.as_str();

        tracing::info!(%name, %namespace, image = %request.image, "Deploying function.");

        let deployment = Deployment::from(&DeploymentBuilder::new(
            &request,
            &namespace,
            &self.config,
        ));
        let service = Service::from(&ServiceBuilder::new(&request, &namespace, &self.config));
        let function = Function::from_deployment(&request, &namespace);

        if let Err(error) = self.client.create_deployment(&namespace, &deployment).await {
            tracing::error!(%error, "Failed to create deployment.");
            return Err(HandlerError::Kube(error));
        }

        tracing::info!(%name, "Created deployment.");

        if let Err(error) = self.client.create_service(&namespace, &service).await {
            tracing::error!(%error, "Failed to create service.");
            return Err(self.roll_back(&namespace, name, error, false).await.into());
        }

        tracing::info!(%name, "Created service.");

        if let Err(error) = self.client.create_function(&namespace, &function).await {
            tracing::error!(%error, "Failed to create function record.");
            return Err(self.roll_back(&namespace, name, error, true).await.into());
        }

        tracing::info!(%name, "Created function record.");

        Ok(())
    }

    async fn roll_back(
        &self,
        namespace: &str,
        name: &str,
        error: KubeError,
        service_created: bool,
    ) -> DeployError {
        tracing::warn!(%name, "Rolling back partial deployment.");

        let service_result = if service_created {
            self.client.delete_service(namespace, name).await
        } else {
            Ok(())
        };
        let deployment_result = self.client.delete_deployment(namespace, name).await;

        match service_result.and(deployment_result) {
            Ok(()) => {
                tracing::info!(%name, "Rolled back.");
                DeployError::Failed(error)
            }
            Err(rollback) => {
                tracing::error!(error = %rollback, "Failed to roll back.");
                DeployError::RollbackFailed { error, rollback }
            }
        }
    }
}
