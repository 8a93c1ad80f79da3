use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error as ThisError;

// RFC 1123 label, as enforced by Kubernetes for service names.
static DNS_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS label pattern is valid")
});

#[derive(ThisError, Debug, PartialEq)]
#[error("({0}) must be a valid DNS entry for service name")]
pub struct InvalidServiceNameError(pub String);

pub fn validate_service_name(service: &str) -> Result<(), InvalidServiceNameError> {
    if DNS_LABEL.is_match(service) {
        return Ok(());
    }

    Err(InvalidServiceNameError(service.to_string()))
}
