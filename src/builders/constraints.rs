use std::collections::BTreeMap;

/// Maps `key=value` constraints to a node selector.
///
/// Anything that does not split into exactly two non-empty parts is dropped,
/// a single bad constraint never fails a deployment. Later duplicates win.
pub fn constraints_to_node_selector(constraints: &[String]) -> BTreeMap<String, String> {
    let mut selector = BTreeMap::new();

    for constraint in constraints {
        let parts: Vec<&str> = constraint.split('=').collect();

        match parts.as_slice() {
            [key, value] if !key.is_empty() && !value.is_empty() => {
                selector.insert(key.to_string(), value.to_string());
            }
            _ => {
                tracing::debug!(%constraint, "Ignoring malformed constraint.");
            }
        }
    }

    selector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn well_formed_constraints_become_selector() {
        let selector = constraints_to_node_selector(&constraints(&["disk=ssd", "zone=eu"]));

        assert_eq!(
            selector,
            BTreeMap::from([
                (String::from("disk"), String::from("ssd")),
                (String::from("zone"), String::from("eu")),
            ])
        );
    }

    #[test]
    fn order_of_distinct_keys_does_not_matter() {
        let forward = constraints_to_node_selector(&constraints(&["disk=ssd", "zone=eu"]));
        let backward = constraints_to_node_selector(&constraints(&["zone=eu", "disk=ssd"]));

        assert_eq!(forward, backward);
        assert_eq!(
            constraints_to_node_selector(&constraints(&["disk=ssd", "zone=eu"])),
            forward
        );
    }

    #[test]
    fn malformed_constraints_are_dropped() {
        assert!(constraints_to_node_selector(&constraints(&["bad"])).is_empty());
        assert!(constraints_to_node_selector(&constraints(&["a=b=c"])).is_empty());
        assert!(constraints_to_node_selector(&constraints(&["=value"])).is_empty());
        assert!(constraints_to_node_selector(&constraints(&["key="])).is_empty());

        let selector = constraints_to_node_selector(&constraints(&["bad", "disk=ssd"]));
        assert_eq!(selector.len(), 1);
        assert_eq!(selector["disk"], "ssd");
    }

    #[test]
    fn last_duplicate_wins() {
        let selector = constraints_to_node_selector(&constraints(&["a=1", "a=2"]));

        assert_eq!(selector, BTreeMap::from([(String::from("a"), String::from("2"))]));
    }

    #[test]
    fn no_constraints_yield_empty_selector() {
        assert!(constraints_to_node_selector(&[]).is_empty());
    }
}
