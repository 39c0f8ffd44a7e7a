//! Convention-based authorization for plain Rust types.
//!
//! Policies answer named predicates about an (actor, subject) pair; scopes
//! filter collections down to what an actor may see. This crate implements
//! the resolution convention in between:
//!
//! - Derive the policy class name from the subject's type (`Post` →
//!   `PostPolicy`, `Admin::Post` → `Admin::PostPolicy`), and the scope class
//!   name nested under it (`PostPolicy::Scope`).
//! - Resolve the name against an explicit [`PolicyRegistry`] populated by
//!   the application at startup.
//! - Construct one instance per call with the actor/subject pair and
//!   dispatch the requested predicate by name.
//!
//! What a policy decides, and how a scope filters, is application business
//! logic behind the [`Policy`] and [`Scope`] traits; the crate never looks
//! inside.
//!
//! # Quick Start
//!
//! ```
//! use warden::{Actor, Policy, PolicyRegistry, Resolver, Subject, TypePath};
//!
//! struct User {
//!     admin: bool,
//! }
//!
//! struct Post {
//!     published: bool,
//! }
//!
//! struct PostPolicy {
//!     admin: bool,
//!     published: bool,
//! }
//!
//! impl Policy for PostPolicy {
//!     fn query(&self, predicate: &str) -> Option<bool> {
//!         match predicate {
//!             "show" => Some(self.published || self.admin),
//!             "destroy" => Some(self.admin),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut registry = PolicyRegistry::new();
//! registry.register_policy("PostPolicy", |actor: &Actor, subject: &Subject| {
//!     Box::new(PostPolicy {
//!         admin: actor.downcast_ref::<User>().is_some_and(|u| u.admin),
//!         published: subject.downcast_ref::<Post>().is_some_and(|p| p.published),
//!     })
//! });
//!
//! let resolver = Resolver::new(registry);
//! let user = Actor::new(User { admin: true });
//! let post = Subject::instance(TypePath::new("Post"), Post { published: false });
//!
//! // Allowed: the subject comes back unchanged for fluent use.
//! let post = resolver.authorize(&user, post, "destroy")?;
//! assert!(matches!(post, Subject::Instance { .. }));
//!
//! // Unknown types resolve to nothing rather than panicking.
//! let comment = Subject::type_ref(TypePath::new("Comment"));
//! assert!(resolver.policy(&user, &comment).is_none());
//! # Ok::<(), warden::PolicyError>(())
//! ```
//!
//! # Failure semantics
//!
//! Every failure is immediate and synchronous. Strict entry points
//! ([`Resolver::authorize`], [`Resolver::require_policy`],
//! [`Resolver::require_policy_scope`]) surface
//! [`PolicyError::NotDefined`] when no class is registered for the derived
//! name; the non-strict counterparts return `None` in that case and only
//! that case. A predicate returning false is always
//! [`PolicyError::NotAuthorized`], never swallowed.

pub mod error;
pub mod finder;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod subject;

// Re-export main types
pub use error::{PolicyError, PolicyResult};
pub use finder::{PolicyFinder, POLICY_SUFFIX, SCOPE_NAME};
pub use policy::{Policy, PolicyClass, Resolved, Scope, ScopeClass};
pub use registry::PolicyRegistry;
pub use resolver::Resolver;
pub use subject::{Actor, Subject, SubjectValue, TypePath, PATH_SEPARATOR};
