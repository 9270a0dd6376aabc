//! Callable identities and the rules that select them for instrumentation.

use std::fmt;

/// Visibility of a callable as seen by interception rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// Identity of a wrapped callable: where it is declared and what it is called.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallableIdentity {
    /// Module path the declaring type lives in (e.g. `app::services::employee`)
    pub namespace: String,

    /// Declaring type name
    pub type_name: String,

    /// Method name
    pub method: String,

    pub visibility: Visibility,
}

impl CallableIdentity {
    /// Create an identity with explicit visibility.
    pub fn new(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        method: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
            method: method.into(),
            visibility,
        }
    }

    /// Create the identity of a public method.
    pub fn public(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self::new(namespace, type_name, method, Visibility::Public)
    }

    /// Fully qualified path of the declaring type.
    pub fn qualified_type(&self) -> String {
        format!("{}::{}", self.namespace, self.type_name)
    }

    /// Short form used in log lines: `Type::method(..)`, or `Type::method()`
    /// when the call takes no arguments.
    pub fn short_string(&self, arity: usize) -> String {
        let params = if arity > 0 { ".." } else { "" };
        format!("{}::{}({})", self.type_name, self.method, params)
    }
}

impl fmt::Display for CallableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.namespace, self.type_name, self.method)
    }
}

/// Predicate deciding whether a callable receives instrumentation.
///
/// Rules are built once at start-up and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptionRule {
    /// Public callables declared in the namespace or any namespace nested under it.
    PublicUnder(String),

    /// Every callable declared by the given fully qualified type, whatever its visibility.
    AllMethodsOf(String),
}

impl InterceptionRule {
    /// Returns true when the identity is selected by this rule.
    pub fn matches(&self, identity: &CallableIdentity) -> bool {
        match self {
            Self::PublicUnder(namespace) => {
                identity.visibility == Visibility::Public
                    && is_within_namespace(&identity.namespace, namespace)
            }
            Self::AllMethodsOf(qualified_type) => identity.qualified_type() == *qualified_type,
        }
    }
}

/// Segment-aware prefix match, so `app::service` does not select `app::services_old`.
fn is_within_namespace(candidate: &str, namespace: &str) -> bool {
    match candidate.strip_prefix(namespace) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}
