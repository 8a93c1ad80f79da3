//! The calls the handlers make against the cluster.

use crate::crds::Function;
use async_trait::async_trait;
use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{Namespace, Service},
};
use kube::{
    api::{DeleteParams, ListParams, PostParams},
    Api, Client as KubeClient, Error as KubeError,
};

#[cfg(test)]
use mockall::automock;

/// Namespaced operations on function deployments, services and records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FunctionsClient: Send + Sync {
    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, KubeError>;

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment, KubeError>;

    /// Replaces the whole object, the resource version must be set.
    async fn replace_deployment(
        &self,
        namespace: &str,
        name: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, KubeError>;

    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<(), KubeError>;

    async fn create_service(&self, namespace: &str, service: &Service)
        -> Result<Service, KubeError>;

    async fn delete_service(&self, namespace: &str, name: &str) -> Result<(), KubeError>;

    async fn create_function(
        &self,
        namespace: &str,
        function: &Function,
    ) -> Result<Function, KubeError>;

    async fn get_function(&self, namespace: &str, name: &str) -> Result<Function, KubeError>;

    async fn replace_function(
        &self,
        namespace: &str,
        name: &str,
        function: &Function,
    ) -> Result<Function, KubeError>;

    async fn delete_function(&self, namespace: &str, name: &str) -> Result<(), KubeError>;

    async fn list_functions(&self, namespace: &str) -> Result<Vec<Function>, KubeError>;

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, KubeError>;
}

pub fn is_not_found(error: &KubeError) -> bool {
    matches!(error, KubeError::Api(response) if response.code == 404)
}

pub fn is_already_exists(error: &KubeError) -> bool {
    matches!(
        error,
        KubeError::Api(response) if response.code == 409 && response.reason == "AlreadyExists"
    )
}

pub struct KubeFunctionsClient {
    client: KubeClient,
}

impl KubeFunctionsClient {
    pub fn new(client: KubeClient) -> Self {
        Self { client }
    }

    fn deployment_api(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn service_api(&self, namespace: &str) -> Api<Service> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn function_api(&self, namespace: &str) -> Api<Function> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl FunctionsClient for KubeFunctionsClient {
    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, KubeError> {
        self.deployment_api(namespace)
            .create(&PostParams::default(), deployment)
            .await
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment, KubeError> {
        self.deployment_api(namespace).get(name).await
    }

    async fn replace_deployment(
        &self,
        namespace: &str,
        name: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, KubeError> {
        self.deployment_api(namespace)
            .replace(name, &PostParams::default(), deployment)
            .await
    }

    async fn delete_deployment(&self, namespace: &str, name: &str) -> Result<(), KubeError> {
        self.deployment_api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn create_service(
        &self,
        namespace: &str,
        service: &Service,
    ) -> Result<Service, KubeError> {
        self.service_api(namespace)
            .create(&PostParams::default(), service)
            .await
    }

    async fn delete_service(&self, namespace: &str, name: &str) -> Result<(), KubeError> {
        self.service_api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn create_function(
        &self,
        namespace: &str,
        function: &Function,
    ) -> Result<Function, KubeError> {
        self.function_api(namespace)
            .create(&PostParams::default(), function)
            .await
    }

    async fn get_function(&self, namespace: &str, name: &str) -> Result<Function, KubeError> {
        self.function_api(namespace).get(name).await
    }

    async fn replace_function(
        &self,
        namespace: &str,
        name: &str,
        function: &Function,
    ) -> Result<Function, KubeError> {
        self.function_api(namespace)
            .replace(name, &PostParams::default(), function)
            .await
    }

    async fn delete_function(&self, namespace: &str, name: &str) -> Result<(), KubeError> {
        self.function_api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn list_functions(&self, namespace: &str) -> Result<Vec<Function>, KubeError> {
        let functions = self
            .function_api(namespace)
            .list(&ListParams::default())
            .await?;
        Ok(functions.items)
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, KubeError> {
        let namespaces = Api::<Namespace>::all(self.client.clone())
            .list(&ListParams::default())
            .await?;
        Ok(namespaces.items)
    }
}


#[cfg(test)]
mod tests {
    use super::{test_utils::*, *};

    #[test]
    fn only_404_is_not_found() {
        assert!(is_not_found(&not_found("echo")));
        assert!(!is_not_found(&api_error(409, "Conflict", "conflict")));
        assert!(!is_not_found(&api_error(500, "InternalError", "boom")));
    }

    #[test]
    fn only_already_exists_conflicts_count_as_existing() {
        assert!(is_already_exists(&api_error(409, "AlreadyExists", "exists")));
        assert!(!is_already_exists(&api_error(409, "Conflict", "modified")));
        assert!(!is_already_exists(&not_found("echo")));
    }
}
