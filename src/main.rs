use clap::Parser;
use openfaas_functions_provide_rs::{
    cli::{Cli, Commands, CrdCommands},
    consts::DEFAULT_LOG_FILTER,
    main_actions::{
        install_crd, print_crd, run_provider, uninstall_crd, write_crd_to_file, ProviderConfig,
    },
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            functions_namespace,
            reserved_namespace,
            port,
            enable_liveness_probe,
            image_pull_policy,
            set_non_root_user,
            request_timeout,
        } => {
            run_provider(ProviderConfig {
                functions_namespace,
                reserved_namespace,
                port,
                enable_liveness_probe,
                image_pull_policy,
                set_non_root_user,
                request_timeout: Duration::from_secs(request_timeout),
            })
            .await
        }
        Commands::Crd { command } => match command {
            CrdCommands::Write { file } => write_crd_to_file(file).await,
            CrdCommands::Print {} => print_crd(),
            CrdCommands::Install {} => install_crd().await,
            CrdCommands::Uninstall {} => uninstall_crd().await,
        },
    };

    if let Err(error) = result {
        tracing::error!(%error, "Exiting.");
        std::process::exit(1);
    }
}
