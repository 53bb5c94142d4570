//! Canonical `Type` handles
//!
//! A `Type` is a `Copy` handle to the registry's canonical entry for one
//! construct. Because the registry interns exactly one entry per
//! identifier for the process lifetime, handle identity is construct
//! identity: two `Type`s compare equal iff they name the same construct.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::descriptor::ConstructKind;
use crate::error::TypeError;
use crate::reflect::ClassReflection;
use crate::registry::{TypeEntry, TypeRegistry};
use crate::value::Value;

/// Canonical, identity-comparable handle to a registered construct.
#[derive(Clone, Copy)]
pub struct Type {
    entry: &'static TypeEntry,
}

impl Type {
    pub(crate) fn from_entry(entry: &'static TypeEntry) -> Self {
        Type { entry }
    }

    /// Resolve any registered construct by identifier, against the global
    /// registry.
    pub fn resolve(name: &str) -> Result<Self, TypeError> {
        TypeRegistry::global().resolve(name)
    }

    /// Resolve a concrete class by identifier, against the global
    /// registry.
    pub fn resolve_class(name: &str) -> Result<Self, TypeError> {
        TypeRegistry::global().resolve_class(name)
    }

    /// Resolve the dynamic runtime type of an instance, against the
    /// global registry.
    pub fn from_instance(instance: &dyn Any) -> Result<Self, TypeError> {
        TypeRegistry::global().resolve_instance(instance)
    }

    /// Resolve the class context of the indirect caller, against the
    /// global registry.
    ///
    /// Intended for a static method that reports its own `Type` through a
    /// helper: both the method and the helper enter class-context frames
    /// (`class_frame!`), and resolution skips exactly the helper's frame.
    pub fn from_caller() -> Result<Self, TypeError> {
        TypeRegistry::global().resolve_caller()
    }

    /// Fully qualified identifier of this construct.
    pub fn name(&self) -> &'static str {
        self.entry.name()
    }

    /// Kind of this construct.
    pub fn kind(&self) -> ConstructKind {
        self.entry.kind()
    }

    /// Invoke a registered static method by name.
    ///
    /// This is the explicit dispatch operation behind the `static_call!`
    /// sugar and stays available independently of it.
    pub fn invoke_static(&self, method: &str, args: &[Value]) -> Result<Value, TypeError> {
        match self.entry.static_fn(method) {
            Some(handler) => Ok(handler(args)),
            None => Err(TypeError::UnknownStaticMethod {
                class: self.entry.name().to_string(),
                method: method.to_string(),
            }),
        }
    }

    /// Read-only reflection handle for this construct.
    pub fn reflect(&self) -> ClassReflection {
        ClassReflection::new(self.entry)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.entry, other.entry)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.entry, state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
