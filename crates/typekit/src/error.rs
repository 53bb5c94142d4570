//! Error types for resolution and dispatch
//!
//! All failures are local and synchronous; none is transient, so nothing
//! is retried.

use crate::descriptor::ConstructKind;

/// Errors reported by the type registry and `Type` operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The identifier does not name any registered construct
    #[error("unknown type identifier `{0}`")]
    UnknownIdentifier(String),

    /// The identifier names a construct that is not a concrete class
    #[error("`{name}` is registered as {kind}, not as a concrete class")]
    NotAClass {
        /// The rejected identifier
        name: String,
        /// Kind of construct the identifier names
        kind: ConstructKind,
    },

    /// The runtime type of the instance was never registered
    #[error("instance runtime type is not registered")]
    UnregisteredInstance,

    /// No static method with the given name on the class
    #[error("class `{class}` has no static method `{method}`")]
    UnknownStaticMethod {
        /// Class identifier
        class: String,
        /// Requested method name
        method: String,
    },

    /// The caller-context stack has no frame at the requested depth
    #[error("no caller context at depth {0}")]
    NoCallerContext(usize),

    /// A runtime definition reused an existing identifier
    #[error("type identifier `{0}` is already defined")]
    DuplicateIdentifier(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TypeError::UnknownIdentifier("Missing".to_string());
        assert_eq!(err.to_string(), "unknown type identifier `Missing`");

        let err = TypeError::UnknownStaticMethod {
            class: "Point".to_string(),
            method: "origin".to_string(),
        };
        assert_eq!(err.to_string(), "class `Point` has no static method `origin`");

        let err = TypeError::NoCallerContext(1);
        assert_eq!(err.to_string(), "no caller context at depth 1");
    }

    #[test]
    fn test_not_a_class_message() {
        let err = TypeError::NotAClass {
            name: "Printable".to_string(),
            kind: ConstructKind::Interface,
        };
        assert!(err.to_string().contains("interface"));
        assert!(err.to_string().contains("Printable"));
    }
}
