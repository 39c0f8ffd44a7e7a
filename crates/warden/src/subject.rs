//! Subject identity: structured type paths and the tagged subject variant.
//!
//! Authorization never inspects domain values directly. Callers describe what
//! is being acted upon as a [`Subject`], and the finder derives policy and
//! scope names from it. Type identity is a structured [`TypePath`] rather than
//! a flat string, so namespace qualification (`Admin::Post`) survives
//! derivation without string-splicing edge cases.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Separator between segments of a qualified name (`Admin::PostPolicy`).
pub const PATH_SEPARATOR: &str = "::";

/// Structured type identity: namespace segments plus a simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypePath {
    namespace: Vec<String>,
    name: String,
}

impl TypePath {
    /// A path with no namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: Vec::new(),
            name: name.into(),
        }
    }

    /// A path under the given namespace segments.
    ///
    /// ```
    /// use warden::TypePath;
    ///
    /// let path = TypePath::namespaced(["Admin"], "Post");
    /// assert_eq!(path.qualified(), "Admin::Post");
    /// ```
    pub fn namespaced<I, S>(namespace: I, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }

    /// Parse a qualified name (`Admin::Post`). Empty segments are dropped, so
    /// a stray separator cannot produce an unnameable path.
    pub fn parse(qualified: &str) -> Self {
        let mut segments: Vec<String> = qualified
            .split(PATH_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        let name = segments.pop().unwrap_or_default();
        Self {
            namespace: segments,
            name,
        }
    }

    /// Namespace segments, outermost first.
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// Simple name, without qualification.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified name, segments joined with [`PATH_SEPARATOR`].
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            return self.name.clone();
        }
        let mut out = self.namespace.join(PATH_SEPARATOR);
        out.push_str(PATH_SEPARATOR);
        out.push_str(&self.name);
        out
    }

    /// Same namespace, `suffix` appended to the simple name
    /// (`Admin::Post` → `Admin::PostPolicy`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: format!("{}{}", self.name, suffix),
        }
    }

    /// `child` nested under this path (`PostPolicy` → `PostPolicy::Scope`).
    pub fn child(&self, child: impl Into<String>) -> Self {
        let mut namespace = self.namespace.clone();
        namespace.push(self.name.clone());
        Self {
            namespace,
            name: child.into(),
        }
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.namespace {
            write!(f, "{}{}", segment, PATH_SEPARATOR)?;
        }
        f.write_str(&self.name)
    }
}

impl From<&str> for TypePath {
    fn from(qualified: &str) -> Self {
        Self::parse(qualified)
    }
}

impl From<String> for TypePath {
    fn from(qualified: String) -> Self {
        Self::parse(&qualified)
    }
}

/// The acting party. Opaque to the core: it is handed to policy and scope
/// constructors unmodified, and only application code knows its real type.
///
/// Cloning is cheap (the value is behind an `Arc`), and the erased value is
/// `Send + Sync` so resolvers can be shared across threads.
#[derive(Clone)]
pub struct Actor(Arc<dyn Any + Send + Sync>);

impl Actor {
    /// Erase an application value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Recover the concrete value, typically inside a policy constructor.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Actor(<opaque>)")
    }
}

/// A type-erased domain value carried by an instance subject.
#[derive(Clone)]
pub struct SubjectValue(Arc<dyn Any + Send + Sync>);

impl SubjectValue {
    /// Erase an application value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Recover the concrete value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for SubjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubjectValue(<opaque>)")
    }
}

/// What is being acted upon.
///
/// The finder resolves each variant explicitly instead of introspecting an
/// untyped value at runtime:
///
/// - [`Subject::Instance`] — a loaded domain value with its runtime type.
/// - [`Subject::Type`] — the domain type itself, for checks with no
///   particular value ("may this user create posts at all?").
/// - [`Subject::Sequence`] — ordered elements; the last element determines
///   policy identity and the leading elements qualify its namespace, so
///   `[admin, post]` targets `Admin::PostPolicy`. Constructors receive the
///   original sequence, not the unwrapped element.
/// - [`Subject::Symbol`] — a bare marker with no meaningful type, used for
///   "no particular model" policies and headless scopes.
/// - [`Subject::Nil`] — no subject at all.
#[derive(Debug, Clone)]
pub enum Subject {
    /// An instance of a domain type.
    Instance {
        /// The erased domain value.
        value: SubjectValue,
        /// The value's runtime type.
        ty: TypePath,
    },

    /// A domain type with no particular value.
    Type(TypePath),

    /// Ordered sequence; the last element drives resolution.
    Sequence(Vec<Subject>),

    /// A bare marker with no meaningful type.
    Symbol(String),

    /// No subject.
    Nil,
}

impl Subject {
    /// An instance of `ty`.
    pub fn instance<T: Any + Send + Sync>(ty: TypePath, value: T) -> Self {
        Self::Instance {
            value: SubjectValue::new(value),
            ty,
        }
    }

    /// The type itself.
    pub fn type_ref(ty: TypePath) -> Self {
        Self::Type(ty)
    }

    /// An ordered sequence of subjects.
    pub fn sequence(items: impl IntoIterator<Item = Subject>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// A bare marker (`dashboard`, `admin`, ...).
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// The element that identifies the record: the last element of a sequence
    /// (recursively), otherwise the subject itself. An empty sequence has no
    /// inner element and is its own target.
    pub fn target(&self) -> &Subject {
        match self {
            Self::Sequence(items) => items.last().map_or(self, Subject::target),
            other => other,
        }
    }

    /// Recover the concrete value of an instance subject, looking through
    /// sequence wrappers. Policies constructed from a namespaced sequence use
    /// this to reach the record itself.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self.target() {
            Self::Instance { value, .. } => value.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance { ty, .. } => write!(f, "{}", ty),
            Self::Type(ty) => write!(f, "{}", ty),
            Self::Sequence(items) => match items.last() {
                Some(last) => write!(f, "{}", last),
                None => f.write_str("empty sequence"),
            },
            Self::Symbol(name) => f.write_str(name),
            Self::Nil => f.write_str("nil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_without_namespace() {
        assert_eq!(TypePath::new("Post").qualified(), "Post");
    }

    #[test]
    fn test_qualified_with_namespace() {
        let path = TypePath::namespaced(["Admin", "Billing"], "Invoice");
        assert_eq!(path.qualified(), "Admin::Billing::Invoice");
    }

    #[test]
    fn test_parse_round_trips() {
        let path = TypePath::parse("Admin::Post");
        assert_eq!(path.namespace(), ["Admin"]);
        assert_eq!(path.name(), "Post");
        assert_eq!(path.qualified(), "Admin::Post");
    }

    #[test]
    fn test_parse_drops_empty_segments() {
        let path = TypePath::parse("Admin::::Post");
        assert_eq!(path.qualified(), "Admin::Post");
    }

    #[test]
    fn test_with_suffix_preserves_namespace() {
        let path = TypePath::namespaced(["Admin"], "Post").with_suffix("Policy");
        assert_eq!(path.qualified(), "Admin::PostPolicy");
    }

    #[test]
    fn test_child_nests_under_name() {
        let path = TypePath::new("PostPolicy").child("Scope");
        assert_eq!(path.qualified(), "PostPolicy::Scope");
        assert_eq!(path.namespace(), ["PostPolicy"]);
    }

    #[test]
    fn test_display_matches_qualified() {
        let path = TypePath::namespaced(["Admin"], "Post");
        assert_eq!(path.to_string(), path.qualified());
    }

    #[test]
    fn test_serialize() {
        let path = TypePath::namespaced(["Admin"], "Post");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"{"namespace":["Admin"],"name":"Post"}"#);
        let back: TypePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_actor_downcast() {
        struct User {
            id: u64,
        }

        let actor = Actor::new(User { id: 7 });
        assert_eq!(actor.downcast_ref::<User>().map(|u| u.id), Some(7));
        assert!(actor.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_subject_target_unwraps_nested_sequences() {
        let inner = Subject::sequence([Subject::symbol("admin"), Subject::type_ref(TypePath::new("Post"))]);
        let subject = Subject::sequence([Subject::symbol("billing"), inner]);

        assert!(matches!(subject.target(), Subject::Type(ty) if ty.name() == "Post"));
    }

    #[test]
    fn test_subject_target_of_empty_sequence_is_itself() {
        let subject = Subject::sequence([]);
        assert!(matches!(subject.target(), Subject::Sequence(items) if items.is_empty()));
    }

    #[test]
    fn test_subject_downcast_through_sequence() {
        struct Post {
            id: u64,
        }

        let subject = Subject::sequence([
            Subject::symbol("admin"),
            Subject::instance(TypePath::new("Post"), Post { id: 3 }),
        ]);
        assert_eq!(subject.downcast_ref::<Post>().map(|p| p.id), Some(3));
    }

    #[test]
    fn test_subject_display() {
        assert_eq!(Subject::type_ref(TypePath::parse("Admin::Post")).to_string(), "Admin::Post");
        assert_eq!(Subject::symbol("dashboard").to_string(), "dashboard");
        assert_eq!(Subject::Nil.to_string(), "nil");
        assert_eq!(Subject::sequence([]).to_string(), "empty sequence");
    }
}
