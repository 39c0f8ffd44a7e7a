//! The explicit type registry.
//!
//! In the host application's terms this replaces ambient constant lookup: a
//! table from qualified class name to constructor, populated once at startup
//! and read-only afterwards. The finder resolves derived names against it;
//! a name with no entry is absence, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::policy::{Policy, PolicyClass, Scope, ScopeClass};
use crate::subject::{Actor, Subject, TypePath};

/// Registry of policy and scope constructors, keyed by qualified name.
///
/// Scopes are registered under the name nested inside their policy
/// (`PostPolicy::Scope`), matching how the finder derives scope names.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, PolicyClass>,
    scopes: HashMap<String, ScopeClass>,
}

impl PolicyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy constructor under `name`. Re-registering a name
    /// replaces the previous entry.
    pub fn register_policy<F>(&mut self, name: impl Into<TypePath>, construct: F)
    where
        F: Fn(&Actor, &Subject) -> Box<dyn Policy> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(name = %name, "registering policy class");
        self.policies
            .insert(name.qualified(), PolicyClass::new(name, Arc::new(construct)));
    }

    /// Register a scope constructor under `name`.
    pub fn register_scope<F>(&mut self, name: impl Into<TypePath>, construct: F)
    where
        F: Fn(&Actor, &Subject) -> Box<dyn Scope> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(name = %name, "registering scope class");
        self.scopes
            .insert(name.qualified(), ScopeClass::new(name, Arc::new(construct)));
    }

    /// Look up a policy class by qualified name.
    pub fn policy_class(&self, name: &TypePath) -> Option<&PolicyClass> {
        self.policies.get(&name.qualified())
    }

    /// Look up a scope class by qualified name.
    pub fn scope_class(&self, name: &TypePath) -> Option<&ScopeClass> {
        self.scopes.get(&name.qualified())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Resolved;

    struct Open;

    impl Policy for Open {
        fn query(&self, _predicate: &str) -> Option<bool> {
            Some(true)
        }
    }

    struct Everything;

    impl Scope for Everything {
        fn resolve(self: Box<Self>) -> Resolved {
            Box::new(Vec::<u64>::new())
        }
    }

    #[test]
    fn test_lookup_by_qualified_name() {
        let mut registry = PolicyRegistry::new();
        registry.register_policy("Admin::PostPolicy", |_, _| Box::new(Open));

        let name = TypePath::namespaced(["Admin"], "PostPolicy");
        assert!(registry.policy_class(&name).is_some());
        assert!(registry.policy_class(&TypePath::new("PostPolicy")).is_none());
    }

    #[test]
    fn test_policies_and_scopes_are_separate_tables() {
        let mut registry = PolicyRegistry::new();
        registry.register_policy("PostPolicy", |_, _| Box::new(Open));
        registry.register_scope("PostPolicy::Scope", |_, _| Box::new(Everything));

        assert!(registry.policy_class(&"PostPolicy".into()).is_some());
        assert!(registry.scope_class(&"PostPolicy".into()).is_none());
        assert!(registry.scope_class(&"PostPolicy::Scope".into()).is_some());
    }

    #[test]
    fn test_reregistering_replaces() {
        struct Closed;
        impl Policy for Closed {
            fn query(&self, _predicate: &str) -> Option<bool> {
                Some(false)
            }
        }

        let mut registry = PolicyRegistry::new();
        registry.register_policy("PostPolicy", |_, _| Box::new(Open));
        registry.register_policy("PostPolicy", |_, _| Box::new(Closed));

        let class = registry.policy_class(&"PostPolicy".into()).unwrap();
        let policy = class.instantiate(&Actor::new(()), &Subject::Nil);
        assert_eq!(policy.query("show"), Some(false));
    }
}
