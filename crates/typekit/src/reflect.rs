//! Read-only reflection handles and snapshots
//!
//! `ClassReflection` exposes the registered shape of a construct without
//! granting any mutation. Snapshots are the serde-serializable form of
//! the same information, for diagnostics and tooling.

use std::fmt;

use serde::Serialize;

use crate::descriptor::ConstructKind;
use crate::registry::TypeEntry;

/// Read-only introspection handle over a registered construct.
#[derive(Clone, Copy)]
pub struct ClassReflection {
    entry: &'static TypeEntry,
}

impl ClassReflection {
    pub(crate) fn new(entry: &'static TypeEntry) -> Self {
        ClassReflection { entry }
    }

    /// Fully qualified identifier of the reflected construct
    pub fn name(&self) -> &'static str {
        self.entry.name()
    }

    /// Kind of the reflected construct
    pub fn kind(&self) -> ConstructKind {
        self.entry.kind()
    }

    /// Names of the registered static methods, in registration order
    pub fn static_method_names(&self) -> &'static [&'static str] {
        self.entry.static_method_names()
    }

    /// Whether a static method with this name is registered
    pub fn has_static_method(&self, name: &str) -> bool {
        self.entry.static_method_names().contains(&name)
    }

    /// Number of registered static methods
    pub fn static_method_count(&self) -> usize {
        self.entry.static_method_names().len()
    }

    /// Serializable description of the reflected construct
    pub fn snapshot(&self) -> TypeSnapshot {
        self.entry.snapshot()
    }
}

impl fmt::Debug for ClassReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassReflection")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("static_methods", &self.static_method_names())
            .finish()
    }
}

/// Serializable description of one registered construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSnapshot {
    /// Fully qualified identifier
    pub name: String,
    /// Construct kind
    pub kind: ConstructKind,
    /// Static method names in registration order
    pub static_methods: Vec<String>,
}

/// Serializable description of every construct known to a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    /// Known constructs, ordered by identifier
    pub types: Vec<TypeSnapshot>,
}

impl RegistrySnapshot {
    /// Render the snapshot as a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
