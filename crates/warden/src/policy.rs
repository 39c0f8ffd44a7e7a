//! Policy and scope instance contracts, and their registered classes.
//!
//! Application code implements [`Policy`] and [`Scope`]; the core only knows
//! how to construct them and what to ask. A [`PolicyClass`] or [`ScopeClass`]
//! is a constructor bound to the qualified name it was registered under.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::subject::{Actor, Subject, TypePath};

/// A filtered collection produced by a scope, type-erased. Callers downcast
/// it back to the concrete collection type they registered.
pub type Resolved = Box<dyn Any + Send + Sync>;

/// An instantiated policy: answers named predicates about the actor/subject
/// pair it was constructed with.
///
/// Predicates are dispatched dynamically by name, so a policy supports
/// arbitrary predicate names without a shared interface beyond this method.
/// `None` means the policy does not define the predicate; the resolver
/// reports that as [`PredicateMissing`](crate::error::PolicyError::PredicateMissing)
/// rather than treating it as a denial.
pub trait Policy: Send + Sync {
    /// Evaluate the named predicate.
    fn query(&self, predicate: &str) -> Option<bool>;
}

/// An instantiated scope: filters a collection down to what its actor may
/// see. Consumed on resolution; scopes are constructed fresh for every call.
pub trait Scope: Send + Sync {
    /// Produce the filtered collection.
    fn resolve(self: Box<Self>) -> Resolved;
}

pub(crate) type PolicyCtor = Arc<dyn Fn(&Actor, &Subject) -> Box<dyn Policy> + Send + Sync>;
pub(crate) type ScopeCtor = Arc<dyn Fn(&Actor, &Subject) -> Box<dyn Scope> + Send + Sync>;

/// A policy type registered under a qualified name.
#[derive(Clone)]
pub struct PolicyClass {
    name: TypePath,
    construct: PolicyCtor,
}

impl PolicyClass {
    pub(crate) fn new(name: TypePath, construct: PolicyCtor) -> Self {
        Self { name, construct }
    }

    /// The qualified name this class was registered under.
    pub fn name(&self) -> &TypePath {
        &self.name
    }

    /// Construct one instance for the pair. The subject is passed through
    /// as given, sequence wrapper included.
    pub fn instantiate(&self, actor: &Actor, subject: &Subject) -> Box<dyn Policy> {
        (self.construct)(actor, subject)
    }
}

impl fmt::Debug for PolicyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyClass")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A scope type registered under a qualified name.
#[derive(Clone)]
pub struct ScopeClass {
    name: TypePath,
    construct: ScopeCtor,
}

impl ScopeClass {
    pub(crate) fn new(name: TypePath, construct: ScopeCtor) -> Self {
        Self { name, construct }
    }

    /// The qualified name this class was registered under.
    pub fn name(&self) -> &TypePath {
        &self.name
    }

    /// Construct one instance for the pair.
    pub fn instantiate(&self, actor: &Actor, subject: &Subject) -> Box<dyn Scope> {
        (self.construct)(actor, subject)
    }
}

impl fmt::Debug for ScopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeClass")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
