use crate::{
    builders::{DeploymentConfig, ImagePullPolicy},
    consts::{DISPLAY_NAME, PKG_VERSION, WATCHDOG_PORT},
    crds::{defs::NAME, Function},
    handlers::{router::router, FunctionsHandler},
    kubernetes::{is_already_exists, is_not_found, KubeFunctionsClient},
    namespace::NamespacePolicy,
    replicas::{spawn_deployment_reflector, ReplicaReader},
};
use anyhow::{Context, Result as AnyResult};
use either::Either::Left;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    api::{DeleteParams, PostParams},
    runtime::{conditions, wait::await_condition},
    Api, Client as KubeClient, CustomResourceExt, ResourceExt,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

pub struct ProviderConfig {
    pub functions_namespace: String,
    pub reserved_namespace: String,
    pub port: u16,
    pub enable_liveness_probe: bool,
    pub image_pull_policy: ImagePullPolicy,
    pub set_non_root_user: bool,
    pub request_timeout: Duration,
}

pub async fn run_provider(config: ProviderConfig) -> AnyResult<()> {
    let client = KubeClient::try_default()
        .await
        .context("Failed to create kubernetes client")?;

    tracing::info!(
        functions_namespace = %config.functions_namespace,
        reserved_namespace = %config.reserved_namespace,
        port = config.port,
        enable_liveness_probe = config.enable_liveness_probe,
        image_pull_policy = %config.image_pull_policy,
        set_non_root_user = config.set_non_root_user,
        request_timeout = ?config.request_timeout,
        "Running with current config."
    );

    let store = spawn_deployment_reflector(client.clone());

    let handler = FunctionsHandler::new(
        NamespacePolicy::new(config.functions_namespace, config.reserved_namespace),
        DeploymentConfig {
            runtime_http_port: WATCHDOG_PORT,
            enable_liveness_probe: config.enable_liveness_probe,
            image_pull_policy: config.image_pull_policy,
            set_non_root_user: config.set_non_root_user,
        },
        Arc::new(KubeFunctionsClient::new(client)),
        ReplicaReader::new(Arc::new(store)),
    )
    .with_timeout(config.request_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    tracing::info!(%addr, name = DISPLAY_NAME, version = PKG_VERSION, "Listening.");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Provider stopped.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal.");
        return;
    }

    tracing::info!("Shutting down.");
}

pub fn generate_crd_yaml() -> AnyResult<String> {
    Function::generate_crd_yaml().context("Failed to generate crd")
}

pub fn print_crd() -> AnyResult<()> {
    println!("{}", generate_crd_yaml()?);
    Ok(())
}

pub async fn write_crd_to_file(path: PathBuf) -> AnyResult<()> {
    let crd = generate_crd_yaml()?;
    tokio::fs::write(path, crd)
        .await
        .context("Failed to write crd to file")?;
    Ok(())
}

async fn crd_api() -> AnyResult<Api<CustomResourceDefinition>> {
    let client = KubeClient::try_default()
        .await
        .context("Failed to create kubernetes client")?;

    Ok(Api::all(client))
}

/// Creates the Function CRD and waits until the cluster serves it. An existing CRD is kept.
pub async fn install_crd() -> AnyResult<()> {
    let api = crd_api().await?;

    match api.create(&PostParams::default(), &Function::crd()).await {
        Ok(_) => tracing::info!(name = NAME, "Crd created."),
        Err(error) if is_already_exists(&error) => {
            tracing::info!(name = NAME, "Crd already installed.")
        }
        Err(error) => return Err(error).context("Failed to create crd"),
    }

    await_condition(api, NAME, conditions::is_crd_established())
        .await
        .context("Failed waiting for crd to be established")?;

    tracing::info!(name = NAME, "Crd established.");

    Ok(())
}

/// Deletes the Function CRD and waits until it is gone. A missing CRD is not an error.
pub async fn uninstall_crd() -> AnyResult<()> {
    let api = crd_api().await?;

    let deleted = match api.delete(NAME, &DeleteParams::default()).await {
        Ok(deleted) => deleted,
        Err(error) if is_not_found(&error) => {
            tracing::info!(name = NAME, "Crd not installed.");
            return Ok(());
        }
        Err(error) => return Err(error).context("Failed to delete crd"),
    };

    let Left(crd) = deleted else {
        tracing::info!(name = NAME, "Crd deleted.");
        return Ok(());
    };

    let Some(uid) = crd.uid() else {
        tracing::warn!(name = NAME, "Crd has no uid, not waiting for deletion.");
        return Ok(());
    };

    await_condition(api, NAME, conditions::is_deleted(&uid))
        .await
        .context("Failed waiting for crd deletion")?;

    tracing::info!(name = NAME, "Crd uninstalled.");

    Ok(())
}
