//! One handler per faas-provider verb.
//!
//! Every verb is a single linear pass: parse, validate, guard the namespace,
//! build or read, call the cluster once per object, translate the result.
//! Nothing is retried and nothing is kept between requests.

mod delete;
mod deploy;
pub mod errors;
mod namespaces;
mod reader;
pub mod router;
mod scale;
mod update;

use crate::{
    builders::DeploymentConfig,
    consts::REQUEST_DEFAULT_TIMEOUT_SECS,
    kubernetes::{is_not_found, FunctionsClient},
    namespace::NamespacePolicy,
    replicas::ReplicaReader,
};
use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use errors::HandlerError;
use kube::Error as KubeError;
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tracing::{trace_span, Instrument};

/// The requests a [`FunctionsHandler`] answers.
#[derive(Debug, Clone)]
pub enum FunctionRequest {
    Deploy {
        body: Bytes,
    },
    Update {
        body: Bytes,
    },
    Delete {
        namespace: Option<String>,
        body: Bytes,
    },
    Get {
        name: String,
        namespace: Option<String>,
    },
    List {
        namespace: Option<String>,
    },
    ListNamespaces,
    Scale {
        name: String,
        namespace: Option<String>,
        body: Bytes,
    },
}

struct HandlerInner {
    policy: NamespacePolicy,
    config: DeploymentConfig,
    client: Arc<dyn FunctionsClient>,
    replicas: ReplicaReader,
}

/// Answers [`FunctionRequest`]s, each within a deadline.
#[derive(Clone)]
pub struct FunctionsHandler {
    inner: Arc<HandlerInner>,
    timeout: Duration,
}

impl FunctionsHandler {
    pub fn new(
        policy: NamespacePolicy,
        config: DeploymentConfig,
        client: Arc<dyn FunctionsClient>,
        replicas: ReplicaReader,
    ) -> Self {
        let inner = Arc::new(HandlerInner {
            policy,
            config,
            client,
            replicas,
        });

        Self {
            inner,
            timeout: Duration::from_secs(REQUEST_DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Requests still waiting on the cluster at the deadline are dropped and answered with 504.
    pub async fn handle(&self, request: FunctionRequest) -> Response {
        let result = tokio::time::timeout(self.timeout, self.dispatch(request))
            .await
            .unwrap_or_else(|_| {
                tracing::error!(timeout = ?self.timeout, "Request timed out.");
                Err(HandlerError::Timeout(self.timeout))
            });

        result.unwrap_or_else(|error| {
            tracing::debug!(%error, status = %error.status_code(), "Request failed.");
            error.into_response()
        })
    }

    async fn dispatch(&self, request: FunctionRequest) -> Result<Response, HandlerError> {
        let inner = &self.inner;

        match request {
            FunctionRequest::Deploy { body } => inner
                .deploy(&body)
                .instrument(trace_span!("Deploy"))
                .await
                .map(|_| StatusCode::ACCEPTED.into_response()),
            FunctionRequest::Update { body } => inner
                .update(&body)
                .instrument(trace_span!("Update"))
                .await
                .map(|_| StatusCode::ACCEPTED.into_response()),
            FunctionRequest::Delete { namespace, body } => inner
                .delete(namespace.as_deref(), &body)
                .instrument(trace_span!("Delete"))
                .await
                .map(|_| StatusCode::ACCEPTED.into_response()),
            FunctionRequest::Get { name, namespace } => inner
                .get(&name, namespace.as_deref())
                .instrument(trace_span!("Get", %name))
                .await
                .map(|status| Json(status).into_response()),
            FunctionRequest::List { namespace } => inner
                .list(namespace.as_deref())
                .instrument(trace_span!("List"))
                .await
                .map(|functions| Json(functions).into_response()),
            FunctionRequest::ListNamespaces => inner
                .list_namespaces()
                .instrument(trace_span!("ListNamespaces"))
                .await
                .map(|namespaces| Json(namespaces).into_response()),
            FunctionRequest::Scale {
                name,
                namespace,
                body,
            } => inner
                .scale(&name, namespace.as_deref(), &body)
                .instrument(trace_span!("Scale", %name))
                .await
                .map(|_| StatusCode::ACCEPTED.into_response()),
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, HandlerError> {
    serde_json::from_slice(body).map_err(|error| HandlerError::BadRequest(error.to_string()))
}

fn not_found_or_kube(error: KubeError, name: &str, namespace: &str) -> HandlerError {
    if is_not_found(&error) {
        return HandlerError::NotFound(format!(
            "function {name} not found in namespace {namespace}"
        ));
    }

    tracing::error!(%error, %name, %namespace, "Kubernetes request failed.");
    HandlerError::Kube(error)
}


#[cfg(test)]
mod tests {
    use super::{test_utils::*, *};
    use crate::{
        crds::Function,
        kubernetes::{test_utils::api_error, MockFunctionsClient},
    };
    use async_trait::async_trait;
    use k8s_openapi::api::{
        apps::v1::Deployment,
        core::v1::{Namespace, Service},
    };
    use std::{
        future::pending,
        io,
        sync::Mutex,
    };

    /// A cluster that accepts requests and never answers them.
    struct UnresponsiveClient;

    #[async_trait]
    impl FunctionsClient for UnresponsiveClient {
        async fn create_deployment(&self, _: &str, _: &Deployment) -> Result<Deployment, KubeError> {
            pending().await
        }

        async fn get_deployment(&self, _: &str, _: &str) -> Result<Deployment, KubeError> {
            pending().await
        }

        async fn replace_deployment(
            &self,
            _: &str,
            _: &str,
            _: &Deployment,
        ) -> Result<Deployment, KubeError> {
            pending().await
        }

        async fn delete_deployment(&self, _: &str, _: &str) -> Result<(), KubeError> {
            pending().await
        }

        async fn create_service(&self, _: &str, _: &Service) -> Result<Service, KubeError> {
            pending().await
        }

        async fn delete_service(&self, _: &str, _: &str) -> Result<(), KubeError> {
            pending().await
        }

        async fn create_function(&self, _: &str, _: &Function) -> Result<Function, KubeError> {
            pending().await
        }

        async fn get_function(&self, _: &str, _: &str) -> Result<Function, KubeError> {
            pending().await
        }

        async fn replace_function(
            &self,
            _: &str,
            _: &str,
            _: &Function,
        ) -> Result<Function, KubeError> {
            pending().await
        }

        async fn delete_function(&self, _: &str, _: &str) -> Result<(), KubeError> {
            pending().await
        }

        async fn list_functions(&self, _: &str) -> Result<Vec<Function>, KubeError> {
            pending().await
        }

        async fn list_namespaces(&self) -> Result<Vec<Namespace>, KubeError> {
            pending().await
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_errors() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        (logs, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn unresponsive_cluster_times_out() {
        let handler = FunctionsHandler::new(
            NamespacePolicy::new(String::from("openfaas-fn"), String::from("kube-system")),
            DeploymentConfig::default(),
            Arc::new(UnresponsiveClient),
            ReplicaReader::new(Arc::new(FakeLister::default())),
        )
        .with_timeout(Duration::from_millis(20));

        let response = handler
            .handle(FunctionRequest::Scale {
                name: String::from("echo"),
                namespace: None,
                body: body(r#"{"replicas": 2}"#),
            })
            .await;

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn rejected_requests_answer_before_the_deadline() {
        let handler = handler(MockFunctionsClient::new()).with_timeout(Duration::from_millis(20));

        let response = handler
            .handle(FunctionRequest::List {
                namespace: Some(String::from("kube-system")),
            })
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn kubernetes_failures_are_logged_as_errors() {
        let (logs, _guard) = capture_errors();
        let mut client = MockFunctionsClient::new();
        client
            .expect_get_function()
            .returning(|_, _| Err(api_error(500, "InternalError", "etcd unavailable")));

        let response = handler(client)
            .handle(FunctionRequest::Get {
                name: String::from("echo"),
                namespace: None,
            })
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let logs = logs.contents();
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("etcd unavailable"), "{logs}");
    }

    #[tokio::test]
    async fn missing_objects_are_not_logged_as_errors() {
        let (logs, _guard) = capture_errors();

        let error = not_found_or_kube(
            crate::kubernetes::test_utils::not_found("echo"),
            "echo",
            "openfaas-fn",
        );

        assert!(matches!(error, HandlerError::NotFound(_)));
        assert_eq!(logs.contents(), "");
    }
}
