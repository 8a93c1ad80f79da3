use const_format::concatcp;

pub const FUNCTIONS_NAMESPACE_ENV_VAR: &str = "OPENFAAS_FUNCTIONS_NAMESPACE";
pub const FUNCTIONS_DEFAULT_NAMESPACE: &str = "openfaas-fn";

pub const RESERVED_NAMESPACE_ENV_VAR: &str = "OPENFAAS_RESERVED_NAMESPACE";
pub const RESERVED_DEFAULT_NAMESPACE: &str = "kube-system";

pub const PROVIDER_PORT_ENV_VAR: &str = "OPENFAAS_PROVIDER_PORT";
pub const PROVIDER_DEFAULT_PORT: u16 = 8081;

pub const ENABLE_LIVENESS_PROBE_ENV_VAR: &str = "OPENFAAS_ENABLE_LIVENESS_PROBE";
pub const IMAGE_PULL_POLICY_ENV_VAR: &str = "OPENFAAS_IMAGE_PULL_POLICY";
pub const SET_NON_ROOT_USER_ENV_VAR: &str = "OPENFAAS_SET_NON_ROOT_USER";

pub const REQUEST_TIMEOUT_ENV_VAR: &str = "OPENFAAS_REQUEST_TIMEOUT";
/// Seconds a request may spend waiting on the cluster.
pub const REQUEST_DEFAULT_TIMEOUT_SECS: u64 = 8;

pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

pub const DEFAULT_LOG_FILTER: &str = concatcp!(PKG_NAME, "=info,tower_http=off,hyper=off");

pub const DISPLAY_NAME: &str = "ProvideRS";
pub const PROVIDER_NAME: &str = concatcp!(PKG_NAME, "/", PKG_VERSION);
pub const ORCHESTRATION: &str = "kubernetes";

/// The label binding a function's pods to its service.
pub const FUNCTION_IDENTITY_LABEL: &str = "faas_function";

/// Port the function's watchdog listens on.
pub const WATCHDOG_PORT: i32 = 8080;

/// Replicas of a freshly deployed function.
pub const INITIAL_REPLICAS: i32 = 1;

pub const REVISION_HISTORY_LIMIT: i32 = 10;

pub const ENV_PROCESS_NAME: &str = "fprocess";

/// User id function containers run as when non-root is enforced.
pub const NON_ROOT_USER_ID: i64 = 12000;

/// Namespaces carrying this annotation with value `"1"` are offered for functions.
pub const FUNCTIONS_NAMESPACE_ANNOTATION: &str = "openfaas";

pub const TMP_DIR: &str = "/tmp";
pub const LOCK_FILE_PATH: &str = concatcp!(TMP_DIR, "/.lock");

pub const FUNCTIONS_ENDPOINT: &str = "/system/functions";
pub const FUNCTION_ENDPOINT: &str = "/system/function/:name";
pub const SCALE_FUNCTION_ENDPOINT: &str = "/system/scale-function/:name";
pub const NAMESPACES_ENDPOINT: &str = "/system/namespaces";
pub const INFO_ENDPOINT: &str = "/system/info";
pub const HEALTH_ENDPOINT: &str = "/healthz";
