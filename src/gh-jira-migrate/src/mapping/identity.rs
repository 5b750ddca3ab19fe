//! Source-handle to destination-identity resolution.

use crate::jira::UserRef;
use std::collections::HashMap;

/// Maps source-system handles to destination account ids.
///
/// Lookups can miss; the reporter falls back to the run-wide default
/// identity, while the assignee is simply left absent.
#[derive(Debug, Clone)]
pub struct IdentityMap {
    entries: HashMap<String, String>,
    default_id: String,
}

impl IdentityMap {
    /// Creates an identity map with a default destination identity.
    pub fn new(entries: HashMap<String, String>, default_id: String) -> Self {
        Self {
            entries,
            default_id,
        }
    }

    /// Resolves a handle, or `None` when it is unmapped.
    pub fn resolve(&self, handle: &str) -> Option<UserRef> {
        self.entries.get(handle).map(|id| UserRef { id: id.clone() })
    }

    /// Resolves a handle, substituting the default identity on a miss.
    pub fn resolve_or_default(&self, handle: &str) -> UserRef {
        self.resolve(handle).unwrap_or_else(|| UserRef {
            id: self.default_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> IdentityMap {
        let mut entries = HashMap::new();
        entries.insert("alice".to_string(), "acc-alice".to_string());
        IdentityMap::new(entries, "acc-default".to_string())
    }

    #[test]
    fn resolves_mapped_handle() {
        assert_eq!(map().resolve("alice").unwrap().id, "acc-alice");
    }

    #[test]
    fn unmapped_handle_is_none() {
        assert!(map().resolve("bob").is_none());
    }

    #[test]
    fn default_substitutes_on_miss() {
        assert_eq!(map().resolve_or_default("bob").id, "acc-default");
        assert_eq!(map().resolve_or_default("alice").id, "acc-alice");
    }
}
