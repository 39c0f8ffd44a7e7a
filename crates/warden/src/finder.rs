//! Policy and scope name derivation and lookup.
//!
//! Derivation is the one nontrivial algorithm in the crate: map a subject to
//! the qualified name of the class that should govern it, then resolve that
//! name against the registry. The rules, in order:
//!
//! 1. A sequence derives from its last element; leading elements qualify the
//!    namespace, so `[admin, post]` targets `Admin::PostPolicy`.
//! 2. A class-like subject names itself; an instance names its runtime type.
//! 3. A subject with no meaningful type (symbol or nil) falls back to its
//!    camel-cased textual form.
//! 4. The policy name is the base name with `Policy` appended, namespace
//!    preserved (`Admin::Post` → `Admin::PostPolicy`); the scope name is
//!    `Scope` nested under the policy name (`Admin::PostPolicy::Scope`).
//!
//! Derivation is deterministic and side-effect-free. Lookups that find
//! nothing return `None`; the `require_*` variants turn absence into
//! [`PolicyError::NotDefined`] carrying the attempted name.

use tracing::debug;

use crate::error::{PolicyError, PolicyResult};
use crate::policy::{PolicyClass, ScopeClass};
use crate::registry::PolicyRegistry;
use crate::subject::{Subject, TypePath};

/// Suffix appended to a type's simple name to obtain its policy name.
pub const POLICY_SUFFIX: &str = "Policy";

/// Simple name of the scope class nested under a policy.
pub const SCOPE_NAME: &str = "Scope";

/// Maps one subject to its policy and scope classes.
///
/// Borrowed and ephemeral: a finder is created per lookup and holds no state
/// beyond the subject and the registry it resolves against.
pub struct PolicyFinder<'r, 's> {
    registry: &'r PolicyRegistry,
    subject: &'s Subject,
}

impl<'r, 's> PolicyFinder<'r, 's> {
    /// A finder for `subject` resolving against `registry`.
    pub fn new(registry: &'r PolicyRegistry, subject: &'s Subject) -> Self {
        Self { registry, subject }
    }

    /// The derived policy name for the subject.
    pub fn policy_name(&self) -> TypePath {
        base_path(self.subject).with_suffix(POLICY_SUFFIX)
    }

    /// The derived scope name: [`SCOPE_NAME`] nested under the policy name.
    pub fn scope_name(&self) -> TypePath {
        self.policy_name().child(SCOPE_NAME)
    }

    /// The policy class for the subject, `None` when nothing is registered
    /// under the derived name.
    pub fn policy_class(&self) -> Option<&'r PolicyClass> {
        let name = self.policy_name();
        let found = self.registry.policy_class(&name);
        debug!(name = %name, found = found.is_some(), "policy lookup");
        found
    }

    /// Strict form of [`PolicyFinder::policy_class`].
    pub fn require_policy_class(&self) -> PolicyResult<&'r PolicyClass> {
        self.policy_class().ok_or_else(|| PolicyError::NotDefined {
            subject: self.subject.clone(),
            name: self.policy_name(),
        })
    }

    /// The scope class for the subject, `None` when nothing is registered
    /// under the derived name.
    pub fn scope_class(&self) -> Option<&'r ScopeClass> {
        let name = self.scope_name();
        let found = self.registry.scope_class(&name);
        debug!(name = %name, found = found.is_some(), "scope lookup");
        found
    }

    /// Strict form of [`PolicyFinder::scope_class`].
    pub fn require_scope_class(&self) -> PolicyResult<&'r ScopeClass> {
        self.scope_class().ok_or_else(|| PolicyError::NotDefined {
            subject: self.subject.clone(),
            name: self.scope_name(),
        })
    }
}

/// The path derivation starts from, before the `Policy` suffix is applied.
fn base_path(subject: &Subject) -> TypePath {
    match subject {
        Subject::Sequence(items) => match items.split_last() {
            Some((last, leading)) => {
                let mut namespace = Vec::new();
                for item in leading {
                    let path = base_path(item);
                    namespace.extend(path.namespace().iter().cloned());
                    namespace.push(path.name().to_string());
                }
                let target = base_path(last);
                namespace.extend(target.namespace().iter().cloned());
                TypePath::namespaced(namespace, target.name())
            }
            // An empty sequence identifies nothing; derive as if absent.
            None => TypePath::new(symbol_to_default_name("nil")),
        },
        Subject::Instance { ty, .. } => ty.clone(),
        Subject::Type(ty) => ty.clone(),
        Subject::Symbol(text) => TypePath::new(symbol_to_default_name(text)),
        Subject::Nil => TypePath::new(symbol_to_default_name("nil")),
    }
}

/// Base name for subjects with no meaningful type: the textual form,
/// camel-cased (`new_dashboard` → `NewDashboard`).
fn symbol_to_default_name(text: &str) -> String {
    text.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}
