//! Type descriptors and link-time registration
//!
//! A `TypeDescriptor` is the registration record for one construct: its
//! fully qualified identifier, its kind, the Rust `TypeId` backing
//! instance resolution, and its static-method table. Descriptors are
//! submitted at link time through `inventory` (see the `register_class!`
//! macro family) and collected when the global registry is first built.

use std::any::TypeId;
use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// Kind of construct an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    /// Concrete, instantiable class
    Class,
    /// Object-safe method surface without instances of its own
    Interface,
    /// Behavior mixin marker
    Trait,
}

impl ConstructKind {
    /// Lowercase display name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructKind::Class => "class",
            ConstructKind::Interface => "interface",
            ConstructKind::Trait => "trait",
        }
    }

    /// Whether constructs of this kind are concrete and instantiable
    pub fn is_concrete(&self) -> bool {
        matches!(self, ConstructKind::Class)
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler signature for a registered static method.
pub type StaticFn = fn(&[Value]) -> Value;

/// A named static method on a registered construct.
#[derive(Clone, Copy)]
pub struct StaticMethodDef {
    /// Method name used for dynamic dispatch
    pub name: &'static str,
    /// Handler invoked on dispatch
    pub invoke: StaticFn,
}

impl fmt::Debug for StaticMethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMethodDef")
            .field("name", &self.name)
            .finish()
    }
}

/// Registration record for one construct.
pub struct TypeDescriptor {
    /// Fully qualified identifier
    pub name: &'static str,
    /// Construct kind
    pub kind: ConstructKind,
    /// Accessor for the Rust `TypeId` backing instance resolution
    pub rust_id: fn() -> TypeId,
    /// Static methods dispatchable on the construct
    pub statics: &'static [StaticMethodDef],
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("statics", &self.statics)
            .finish()
    }
}

/// Wrapper for `inventory::collect!`.
pub struct TypeDescriptorReg(pub &'static TypeDescriptor);

inventory::collect!(TypeDescriptorReg);
