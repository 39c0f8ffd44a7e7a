//! Error types for policy resolution.

use crate::subject::{Subject, TypePath};

/// Failures produced by resolution and authorization.
///
/// All of these are terminal for the current call. Nothing is retried and
/// nothing is recovered internally; a caller-level boundary (typically the
/// request-handling layer) decides what the user sees. Non-strict entry
/// points convert [`NotDefined`](PolicyError::NotDefined) — and only that
/// variant — into `None`.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The policy resolved, but the predicate returned false.
    #[error("not allowed to {query} this {subject}")]
    NotAuthorized {
        /// The predicate that was asked.
        query: String,
        /// The record the check was about.
        subject: Subject,
        /// Qualified name of the policy that answered.
        policy: TypePath,
    },

    /// No class is registered under the derived qualified name.
    #[error("unable to find {name} for {subject}")]
    NotDefined {
        /// The record resolution was attempted for.
        subject: Subject,
        /// The name that was derived and looked up.
        name: TypePath,
    },

    /// The policy resolved, but does not define the requested predicate.
    /// Distinct from denial so a typo in a predicate name fails loudly
    /// instead of silently forbidding everything.
    #[error("{policy} does not define predicate {query}")]
    PredicateMissing {
        /// The predicate that was asked.
        query: String,
        /// Qualified name of the policy that was resolved.
        policy: TypePath,
    },
}

/// Result type for resolution operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authorized_display() {
        let err = PolicyError::NotAuthorized {
            query: "show".to_string(),
            subject: Subject::type_ref(TypePath::new("Post")),
            policy: TypePath::new("PostPolicy"),
        };
        assert_eq!(err.to_string(), "not allowed to show this Post");
    }

    #[test]
    fn test_not_defined_display() {
        let err = PolicyError::NotDefined {
            subject: Subject::Nil,
            name: TypePath::new("NilPolicy"),
        };
        assert_eq!(err.to_string(), "unable to find NilPolicy for nil");
    }

    #[test]
    fn test_predicate_missing_display() {
        let err = PolicyError::PredicateMissing {
            query: "destroy".to_string(),
            policy: TypePath::parse("Admin::PostPolicy"),
        };
        assert_eq!(
            err.to_string(),
            "Admin::PostPolicy does not define predicate destroy"
        );
    }
}
