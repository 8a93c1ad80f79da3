use std::path::PathBuf;

use crate::{
    builders::ImagePullPolicy,
    consts::{
        ENABLE_LIVENESS_PROBE_ENV_VAR, FUNCTIONS_DEFAULT_NAMESPACE, FUNCTIONS_NAMESPACE_ENV_VAR,
        IMAGE_PULL_POLICY_ENV_VAR, PROVIDER_DEFAULT_PORT, PROVIDER_PORT_ENV_VAR,
        REQUEST_DEFAULT_TIMEOUT_SECS, REQUEST_TIMEOUT_ENV_VAR, RESERVED_DEFAULT_NAMESPACE,
        RESERVED_NAMESPACE_ENV_VAR, SET_NON_ROOT_USER_ENV_VAR,
    },
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the OpenFaaS functions provider
    #[clap(visible_alias = "r")]
    Run {
        /// The default namespace for OpenFaaS functions
        #[clap(short = 'n', long, env = FUNCTIONS_NAMESPACE_ENV_VAR, default_value = FUNCTIONS_DEFAULT_NAMESPACE)]
        functions_namespace: String,
        /// The namespace functions may never be deployed to or read from
        #[clap(long, env = RESERVED_NAMESPACE_ENV_VAR, default_value = RESERVED_DEFAULT_NAMESPACE)]
        reserved_namespace: String,
        /// The port the provider listens on
        #[clap(short, long, env = PROVIDER_PORT_ENV_VAR, default_value_t = PROVIDER_DEFAULT_PORT)]
        port: u16,
        /// Adds an exec liveness probe on the watchdog lock file to every function
        #[clap(long, env = ENABLE_LIVENESS_PROBE_ENV_VAR)]
        enable_liveness_probe: bool,
        /// Image pull policy of function containers
        #[clap(long, env = IMAGE_PULL_POLICY_ENV_VAR, value_enum, default_value_t = ImagePullPolicy::default())]
        image_pull_policy: ImagePullPolicy,
        /// Runs function containers as an unprivileged user
        #[clap(long, env = SET_NON_ROOT_USER_ENV_VAR)]
        set_non_root_user: bool,
        /// Seconds a request may wait on the cluster before it is answered with 504
        #[clap(short = 't', long, env = REQUEST_TIMEOUT_ENV_VAR, default_value_t = REQUEST_DEFAULT_TIMEOUT_SECS)]
        request_timeout: u64,
    },
    /// Custom definition resource (CRD) commands
    #[clap(visible_alias = "c")]
    Crd {
        #[command(subcommand)]
        command: CrdCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CrdCommands {
    /// Writes the CRD to a file
    #[clap(visible_alias = "w")]
    Write {
        /// The path to the file to write the CRD to
        #[clap(short, long)]
        file: PathBuf,
    },
    /// Prints the CRD to stdout
    #[clap(visible_alias = "p")]
    Print {},
    /// Installs the CRD to the cluster
    #[clap(visible_alias = "in")]
    Install {},
    /// Uninstalls the CRD from the cluster
    #[clap(visible_alias = "un")]
    Uninstall {},
}
