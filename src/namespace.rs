use thiserror::Error as ThisError;

#[derive(ThisError, Debug, PartialEq)]
#[error("unable to access functions within the {0} namespace")]
pub struct ReservedNamespaceError(pub String);

/// Decides which namespace a request targets and whether it may.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespacePolicy {
    default_namespace: String,
    reserved_namespace: String,
}

impl NamespacePolicy {
    pub fn new(default_namespace: String, reserved_namespace: String) -> Self {
        Self {
            default_namespace,
            reserved_namespace,
        }
    }

    /// A non-empty requested namespace overrides the default.
    pub fn resolve(&self, requested: Option<&str>) -> String {
        match requested {
            Some(namespace) if !namespace.is_empty() => namespace.to_string(),
            _ => self.default_namespace.clone(),
        }
    }

    pub fn guard(&self, namespace: &str) -> Result<(), ReservedNamespaceError> {
        if namespace == self.reserved_namespace {
            return Err(ReservedNamespaceError(namespace.to_string()));
        }

        Ok(())
    }

    /// Resolves then guards.
    pub fn effective(&self, requested: Option<&str>) -> Result<String, ReservedNamespaceError> {
        let namespace = self.resolve(requested);
        self.guard(&namespace)?;
        Ok(namespace)
    }
}

/// Splits `name.namespace` as addressed by the gateway. Without a dot the given namespace is kept.
pub fn split_function_name(name: &str, namespace: &str) -> (String, String) {
    match name.rsplit_once('.') {
        Some((function_name, function_namespace))
            if !function_name.is_empty() && !function_namespace.is_empty() =>
        {
            (function_name.to_string(), function_namespace.to_string())
        }
        _ => (name.to_string(), namespace.to_string()),
    }
}
