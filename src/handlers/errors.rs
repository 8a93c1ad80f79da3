use crate::{namespace::ReservedNamespaceError, validation::InvalidServiceNameError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kube::Error as KubeError;
use std::time::Duration;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    InvalidServiceName(#[from] InvalidServiceNameError),
    #[error(transparent)]
    ReservedNamespace(#[from] ReservedNamespaceError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Kube(#[source] KubeError),
    #[error("{0}")]
    List(#[source] KubeError),
    #[error(transparent)]
    Deploy(#[from] DeployError),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl HandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::BadRequest(_) | HandlerError::InvalidServiceName(_) => {
                StatusCode::BAD_REQUEST
            }
            HandlerError::ReservedNamespace(_) => StatusCode::UNAUTHORIZED,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::List(_) => StatusCode::BAD_REQUEST,
            HandlerError::Kube(_) | HandlerError::Deploy(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// A failed step of a deployment, with the outcome of undoing the steps before it.
#[derive(ThisError, Debug)]
pub enum DeployError {
    #[error("{0}")]
    Failed(#[source] KubeError),
    #[error("{error}, rollback failed: {rollback}")]
    RollbackFailed {
        #[source]
        error: KubeError,
        rollback: KubeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubernetes::test_utils::api_error;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (
                HandlerError::BadRequest(String::from("bad json")),
                StatusCode::BAD_REQUEST,
            ),
            (
                HandlerError::from(InvalidServiceNameError(String::from("Bad_Name"))),
                StatusCode::BAD_REQUEST,
            ),
            (
                HandlerError::from(ReservedNamespaceError(String::from("kube-system"))),
                StatusCode::UNAUTHORIZED,
            ),
            (
                HandlerError::NotFound(String::from("echo")),
                StatusCode::NOT_FOUND,
            ),
            (
                HandlerError::Kube(api_error(409, "Conflict", "conflict")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                HandlerError::List(api_error(403, "Forbidden", "forbidden")),
                StatusCode::BAD_REQUEST,
            ),
            (
                HandlerError::Timeout(Duration::from_secs(8)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn orchestrator_message_is_passed_through() {
        let error = HandlerError::Kube(api_error(
            409,
            "AlreadyExists",
            "deployments.apps \"echo\" already exists",
        ));

        assert!(error
            .to_string()
            .contains("deployments.apps \"echo\" already exists"));
    }

    #[test]
    fn rollback_failure_reports_both_errors() {
        let error = DeployError::RollbackFailed {
            error: api_error(500, "InternalError", "service quota exceeded"),
            rollback: api_error(500, "InternalError", "etcd unavailable"),
        };

        let message = error.to_string();
        assert!(message.contains("service quota exceeded"));
        assert!(message.contains("etcd unavailable"));
    }
}
