use super::{errors::HandlerError, not_found_or_kube, parse_body, HandlerInner};
use crate::{
    builders::DeploymentBuilder, crds::Function, types::FunctionDeployment,
    validation::validate_service_name,
};
use k8s_openapi::api::apps::v1::Deployment;

impl HandlerInner {
    /// Replaces the deployment and the function record of an existing function.
    ///
    /// The live replica count survives, the service is left as it is.
    pub(super) async fn update(&self, body: &[u8]) -> Result<(), HandlerError> {
        let request: FunctionDeployment = parse_body(body)?;
        validate_service_name(&request.service)?;
        let namespace = self.policy.effective(request.namespace.as_deref())?;
        let name = request.service.as_str();

        tracing::info!(%name, %namespace, image = %request.image, "Updating function.");

        let existing_function = self
            .client
            .get_function(&namespace, name)
            .await
            .map_err(|error| not_found_or_kube(error, name, &namespace))?;

        let existing_deployment = self
            .client
            .get_deployment(&namespace, name)
            .await
            .map_err(|error| not_found_or_kube(error, name, &namespace))?;

        let mut deployment = Deployment::from(&DeploymentBuilder::new(
            &request,
            &namespace,
            &self.config,
        ));
        deployment.metadata.resource_version = existing_deployment.metadata.resource_version;
        if let (Some(spec), Some(existing_spec)) = (deployment.spec.as_mut(), existing_deployment.spec)
        {
            spec.replicas = existing_spec.replicas;
        }

        if let Err(error) = self
            .client
            .replace_deployment(&namespace, name, &deployment)
            .await
        {
            tracing::error!(%error, "Failed to replace deployment.");
            return Err(HandlerError::Kube(error));
        }

        tracing::info!(%name, "Replaced deployment.");

        let mut function = Function::from_deployment(&request, &namespace);
        function.metadata.resource_version = existing_function.metadata.resource_version;

        if let Err(error) = self
            .client
            .replace_function(&namespace, name, &function)
            .await
        {
            tracing::error!(%error, "Failed to replace function record.");
            return Err(HandlerError::Kube(error));
        }

        tracing::info!(%name, "Replaced function record.");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_utils::*, FunctionRequest};
    use crate::{
        builders::{DeploymentBuilder, DeploymentConfig},
        crds::Function,
        kubernetes::{
            test_utils::{api_error, not_found},
            MockFunctionsClient,
        },
        types::FunctionDeployment,
    };
    use axum::http::StatusCode;
    use k8s_openapi::api::apps::v1::Deployment;

    const ECHO_V2: &str = r#"{"service": "echo", "image": "ghcr.io/x/echo:v2"}"#;

    fn live_objects(replicas: i32) -> (Deployment, Function) {
        let request = FunctionDeployment {
            service: String::from("echo"),
            image: String::from("ghcr.io/x/echo:v1"),
            ..Default::default()
        };
        let config = DeploymentConfig::default();

        let mut deployment =
            Deployment::from(&DeploymentBuilder::new(&request, "openfaas-fn", &config));
        deployment.metadata.resource_version = Some(String::from("41"));
        if let Some(spec) = deployment.spec.as_mut() {
            spec.replicas = Some(replicas);
        }

        let mut function = Function::from_deployment(&request, "openfaas-fn");
        function.metadata.resource_version = Some(String::from("7"));

        (deployment, function)
    }

    async fn update(client: MockFunctionsClient, json: &str) -> StatusCode {
        handler(client)
            .handle(FunctionRequest::Update { body: body(json) })
            .await
            .status()
    }

    #[tokio::test]
    async fn update_keeps_replicas_and_resource_versions() {
        let (deployment, function) = live_objects(4);
        let mut client = MockFunctionsClient::new();
        client
            .expect_get_function()
            .times(1)
            .returning(move |_, _| Ok(function.clone()));
        client
            .expect_get_deployment()
            .times(1)
            .returning(move |_, _| Ok(deployment.clone()));
        client
            .expect_replace_deployment()
            .withf(|namespace, name, deployment| {
                let spec = deployment.spec.as_ref().unwrap();
                let container = &spec.template.spec.as_ref().unwrap().containers[0];
                namespace == "openfaas-fn"
                    && name == "echo"
                    && spec.replicas == Some(4)
                    && deployment.metadata.resource_version.as_deref() == Some("41")
                    && container.image.as_deref() == Some("ghcr.io/x/echo:v2")
            })
            .times(1)
            .returning(|_, _, deployment| Ok(deployment.clone()));
        client
            .expect_replace_function()
            .withf(|_, name, function| {
                name == "echo"
                    && function.metadata.resource_version.as_deref() == Some("7")
                    && function.spec.image == "ghcr.io/x/echo:v2"
            })
            .times(1)
            .returning(|_, _, function| Ok(function.clone()));

        assert_eq!(update(client, ECHO_V2).await, StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn unknown_function_is_not_found() {
        let mut client = MockFunctionsClient::new();
        client
            .expect_get_function()
            .times(1)
            .returning(|_, name| Err(not_found(name)));

        assert_eq!(update(client, ECHO_V2).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_deployment_is_not_found() {
        let (_, function) = live_objects(1);
        let mut client = MockFunctionsClient::new();
        client
            .expect_get_function()
            .returning(move |_, _| Ok(function.clone()));
        client
            .expect_get_deployment()
            .times(1)
            .returning(|_, name| Err(not_found(name)));

        assert_eq!(update(client, ECHO_V2).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn conflicting_replace_is_a_server_error() {
        let (deployment, function) = live_objects(1);
        let mut client = MockFunctionsClient::new();
        client
            .expect_get_function()
            .returning(move |_, _| Ok(function.clone()));
        client
            .expect_get_deployment()
            .returning(move |_, _| Ok(deployment.clone()));
        client
            .expect_replace_deployment()
            .times(1)
            .returning(|_, _, _| Err(api_error(409, "Conflict", "the object has been modified")));

        assert_eq!(update(client, ECHO_V2).await, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn reserved_namespace_is_rejected() {
        let client = MockFunctionsClient::new();
        let json = r#"{"service": "echo", "image": "echo", "namespace": "kube-system"}"#;

        assert_eq!(update(client, json).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_name_is_rejected() {
        let client = MockFunctionsClient::new();

        let status = update(client, r#"{"service": "-echo", "image": "echo"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
