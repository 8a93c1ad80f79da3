use crate::consts::ENV_PROCESS_NAME;
use k8s_openapi::api::core::v1::{EnvVar, LocalObjectReference};
use std::collections::BTreeMap;

/// Builds the container environment.
///
/// `fprocess` comes first. The other variables are only passed when a process
/// is set, without one the watchdog has nothing to hand them to.
pub fn env_vars(
    env_process: Option<&str>,
    env_vars: Option<&BTreeMap<String, String>>,
) -> Vec<EnvVar> {
    let mut vars = Vec::new();

    let Some(env_process) = env_process.filter(|process| !process.is_empty()) else {
        return vars;
    };

    vars.push(EnvVar {
        name: String::from(ENV_PROCESS_NAME),
        value: Some(env_process.to_string()),
        ..Default::default()
    });

    // A user entry named fprocess is kept as well. It comes last, so it is the one the pod sees.
    if let Some(env_vars) = env_vars {
        for (name, value) in env_vars {
            vars.push(EnvVar {
                name: name.clone(),
                value: Some(value.clone()),
                ..Default::default()
            });
        }
    }

    vars
}

/// One pull secret reference per secret name, in order. Existence is checked by the cluster.
pub fn image_pull_secrets(secrets: &[String]) -> Vec<LocalObjectReference> {
    secrets
        .iter()
        .map(|secret| LocalObjectReference {
            name: Some(secret.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_bar() -> BTreeMap<String, String> {
        BTreeMap::from([(String::from("FOO"), String::from("bar"))])
    }

    #[test]
    fn env_vars_are_dropped_without_process() {
        assert!(env_vars(Some(""), Some(&foo_bar())).is_empty());
        assert!(env_vars(None, Some(&foo_bar())).is_empty());
    }

    #[test]
    fn process_comes_first() {
        let vars = env_vars(Some("python3 index.py"), Some(&foo_bar()));

        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].name, "fprocess");
        assert_eq!(vars[0].value.as_deref(), Some("python3 index.py"));
        assert_eq!(vars[1].name, "FOO");
        assert_eq!(vars[1].value.as_deref(), Some("bar"));
    }

    #[test]
    fn user_fprocess_follows_and_overrides_the_process() {
        let user = BTreeMap::from([(String::from("fprocess"), String::from("env"))]);

        let vars = env_vars(Some("cat"), Some(&user));

        let names: Vec<&str> = vars.iter().map(|var| var.name.as_str()).collect();
        assert_eq!(names, vec!["fprocess", "fprocess"]);
        assert_eq!(vars[0].value.as_deref(), Some("cat"));
        assert_eq!(vars[1].value.as_deref(), Some("env"));
    }

    #[test]
    fn process_alone() {
        let vars = env_vars(Some("cat"), None);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "fprocess");
    }

    #[test]
    fn secrets_map_one_to_one_without_dedup() {
        let secrets = vec![
            String::from("registry"),
            String::from("api-key"),
            String::from("registry"),
        ];

        let references = image_pull_secrets(&secrets);

        let names: Vec<_> = references.iter().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["registry", "api-key", "registry"]);
    }
}
