use super::{FunctionRequest, FunctionsHandler};
use crate::{
    consts::{
        FUNCTIONS_ENDPOINT, FUNCTION_ENDPOINT, HEALTH_ENDPOINT, INFO_ENDPOINT, NAMESPACES_ENDPOINT,
        ORCHESTRATION, PKG_VERSION, PROVIDER_NAME, SCALE_FUNCTION_ENDPOINT,
    },
    types::{ProviderInfo, VersionInfo},
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct NamespaceQuery {
    namespace: Option<String>,
}

pub fn router(handler: FunctionsHandler) -> Router {
    Router::new()
        .route(
            FUNCTIONS_ENDPOINT,
            get(list_functions)
                .post(deploy_function)
                .put(update_function)
                .delete(delete_function),
        )
        .route(FUNCTION_ENDPOINT, get(get_function))
        .route(SCALE_FUNCTION_ENDPOINT, post(scale_function))
        .route(NAMESPACES_ENDPOINT, get(list_namespaces))
        .route(INFO_ENDPOINT, get(info))
        .route(HEALTH_ENDPOINT, get(|| async { StatusCode::OK }))
        .with_state(handler)
}

async fn list_functions(
    State(handler): State<FunctionsHandler>,
    Query(query): Query<NamespaceQuery>,
) -> Response {
    handler
        .handle(FunctionRequest::List {
            namespace: query.namespace,
        })
        .await
}

async fn deploy_function(State(handler): State<FunctionsHandler>, body: Bytes) -> Response {
    handler.handle(FunctionRequest::Deploy { body }).await
}

async fn update_function(State(handler): State<FunctionsHandler>, body: Bytes) -> Response {
    handler.handle(FunctionRequest::Update { body }).await
}

async fn delete_function(
    State(handler): State<FunctionsHandler>,
    Query(query): Query<NamespaceQuery>,
    body: Bytes,
) -> Response {
    handler
        .handle(FunctionRequest::Delete {
            namespace: query.namespace,
            body,
        })
        .await
}

async fn get_function(
    State(handler): State<FunctionsHandler>,
    Path(name): Path<String>,
    Query(query): Query<NamespaceQuery>,
) -> Response {
    handler
        .handle(FunctionRequest::Get {
            name,
            namespace: query.namespace,
        })
        .await
}

async fn scale_function(
    State(handler): State<FunctionsHandler>,
    Path(name): Path<String>,
    Query(query): Query<NamespaceQuery>,
    body: Bytes,
) -> Response {
    handler
        .handle(FunctionRequest::Scale {
            name,
            namespace: query.namespace,
            body,
        })
        .await
}

async fn list_namespaces(State(handler): State<FunctionsHandler>) -> Response {
    handler.handle(FunctionRequest::ListNamespaces).await
}

async fn info() -> Json<ProviderInfo> {
    Json(ProviderInfo {
        provider: PROVIDER_NAME.to_string(),
        orchestration: ORCHESTRATION.to_string(),
        version: VersionInfo {
            release: PKG_VERSION.to_string(),
        },
    })
}
