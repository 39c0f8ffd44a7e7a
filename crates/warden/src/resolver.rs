//! Authorization entry points.
//!
//! The resolver owns the registry and orchestrates the call pattern of the
//! crate: find the class governing a subject, construct exactly one instance
//! with the actor/subject pair, and either ask it a predicate (`authorize`)
//! or ask the scope to filter (`policy_scope`). Strict variants propagate
//! [`PolicyError::NotDefined`]; non-strict variants return `None` instead.
//! Every call re-resolves and re-instantiates; nothing is cached between
//! calls.

use tracing::debug;

use crate::error::{PolicyError, PolicyResult};
use crate::finder::PolicyFinder;
use crate::policy::{Policy, Resolved};
use crate::registry::PolicyRegistry;
use crate::subject::{Actor, Subject};

/// Orchestrates authorization checks and scope resolution against one
/// registry.
///
/// All methods take `&self` and the registry is read-only after
/// construction, so a resolver can sit behind an `Arc` and serve concurrent
/// callers without synchronization.
#[derive(Debug)]
pub struct Resolver {
    registry: PolicyRegistry,
}

impl Resolver {
    /// A resolver over the given registry.
    pub fn new(registry: PolicyRegistry) -> Self {
        Self { registry }
    }

    /// The registry this resolver resolves against.
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Authorize `actor` to perform `query` on `subject`.
    ///
    /// Resolves the policy strictly, constructs one instance, and dispatches
    /// the predicate by name. On success the subject is returned unchanged,
    /// so the call can guard a larger expression:
    ///
    /// ```ignore
    /// let post = resolver.authorize(&user, post, "update")?;
    /// ```
    ///
    /// A predicate the policy does not define is
    /// [`PolicyError::PredicateMissing`], not a denial.
    pub fn authorize(&self, actor: &Actor, subject: Subject, query: &str) -> PolicyResult<Subject> {
        let class = self.finder(&subject).require_policy_class()?;
        let policy = class.instantiate(actor, &subject);

        match policy.query(query) {
            Some(true) => {
                debug!(policy = %class.name(), query, "authorized");
                Ok(subject)
            }
            Some(false) => Err(PolicyError::NotAuthorized {
                query: query.to_string(),
                subject,
                policy: class.name().clone(),
            }),
            None => Err(PolicyError::PredicateMissing {
                query: query.to_string(),
                policy: class.name().clone(),
            }),
        }
    }

    /// A policy instance for the pair, `None` when no policy class is
    /// registered for the subject.
    pub fn policy(&self, actor: &Actor, subject: &Subject) -> Option<Box<dyn Policy>> {
        self.finder(subject)
            .policy_class()
            .map(|class| class.instantiate(actor, subject))
    }

    /// Strict form of [`Resolver::policy`].
    pub fn require_policy(&self, actor: &Actor, subject: &Subject) -> PolicyResult<Box<dyn Policy>> {
        let class = self.finder(subject).require_policy_class()?;
        Ok(class.instantiate(actor, subject))
    }

    /// The filtered collection for the pair: construct the scope class and
    /// invoke its resolve operation. `None` when no scope class is
    /// registered for the subject.
    pub fn policy_scope(&self, actor: &Actor, subject: &Subject) -> Option<Resolved> {
        self.finder(subject)
            .scope_class()
            .map(|class| class.instantiate(actor, subject).resolve())
    }

    /// Strict form of [`Resolver::policy_scope`].
    pub fn require_policy_scope(&self, actor: &Actor, subject: &Subject) -> PolicyResult<Resolved> {
        let class = self.finder(subject).require_scope_class()?;
        Ok(class.instantiate(actor, subject).resolve())
    }

    /// Single construction point for finders.
    fn finder<'s>(&self, subject: &'s Subject) -> PolicyFinder<'_, 's> {
        PolicyFinder::new(&self.registry, subject)
    }
}
