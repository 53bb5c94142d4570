//! Canonical type registry
//!
//! Maps type identifiers to canonical, identity-stable entries. The
//! registry starts empty and interns one `TypeEntry` per identifier on
//! first resolution; entries live for the process lifetime, so `Type`
//! handles are `Copy` borrows of `'static` data and compare by identity.
//!
//! The process-wide instance is reached through [`TypeRegistry::global`],
//! built lazily over every link-time registration in the binary. Fresh
//! registries can be constructed for tests and populated through
//! [`TypeRegistry::define`].

use std::any::{Any, TypeId};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::caller;
use crate::descriptor::{ConstructKind, StaticFn, TypeDescriptor, TypeDescriptorReg};
use crate::error::TypeError;
use crate::reflect::{RegistrySnapshot, TypeSnapshot};
use crate::ty::Type;

/// Canonical entry for one registered construct.
///
/// Exactly one entry exists per identifier for the process lifetime;
/// `Type` handles compare by entry identity.
#[derive(Debug)]
pub struct TypeEntry {
    name: &'static str,
    kind: ConstructKind,
    methods: FxHashMap<&'static str, StaticFn>,
    method_names: Vec<&'static str>,
}

impl TypeEntry {
    fn from_descriptor(descriptor: &'static TypeDescriptor) -> Self {
        let mut methods = FxHashMap::default();
        let mut method_names = Vec::with_capacity(descriptor.statics.len());
        for def in descriptor.statics {
            methods.insert(def.name, def.invoke);
            method_names.push(def.name);
        }
        TypeEntry {
            name: descriptor.name,
            kind: descriptor.kind,
            methods,
            method_names,
        }
    }

    /// Fully qualified identifier of this construct
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kind of this construct
    pub fn kind(&self) -> ConstructKind {
        self.kind
    }

    /// Names of the registered static methods, in registration order
    pub fn static_method_names(&self) -> &[&'static str] {
        &self.method_names
    }

    pub(crate) fn static_fn(&self, name: &str) -> Option<StaticFn> {
        self.methods.get(name).copied()
    }

    pub(crate) fn snapshot(&self) -> TypeSnapshot {
        TypeSnapshot {
            name: self.name.to_string(),
            kind: self.kind,
            static_methods: self.method_names.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    /// Link-time universe: identifier to registration record
    descriptors: FxHashMap<&'static str, &'static TypeDescriptor>,
    /// Interned canonical entries
    entries: FxHashMap<&'static str, &'static TypeEntry>,
    /// Rust `TypeId` to identifier, for instance and caller resolution
    by_rust_id: FxHashMap<TypeId, &'static str>,
}

/// Process-wide mapping from type identifiers to canonical entries.
pub struct TypeRegistry {
    inner: RwLock<RegistryInner>,
}

impl TypeRegistry {
    /// Create an empty registry with no known constructs.
    pub fn new() -> Self {
        TypeRegistry {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    /// Registry populated with every link-time registration in the binary.
    fn linked() -> Self {
        let registry = TypeRegistry::new();
        {
            let mut inner = registry.inner.write();
            for reg in inventory::iter::<TypeDescriptorReg> {
                let descriptor = reg.0;
                inner.descriptors.insert(descriptor.name, descriptor);
                inner.by_rust_id.insert((descriptor.rust_id)(), descriptor.name);
            }
        }
        registry
    }

    /// The process-wide registry over all link-time registrations.
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::linked);
        &GLOBAL
    }

    /// Resolve any registered construct by identifier.
    pub fn resolve(&self, name: &str) -> Result<Type, TypeError> {
        self.entry(name).map(Type::from_entry)
    }

    /// Resolve a concrete class by identifier.
    ///
    /// Interfaces and trait markers exist in the registry but are not
    /// instantiable, so they are rejected here even though they resolve
    /// through [`TypeRegistry::resolve`].
    pub fn resolve_class(&self, name: &str) -> Result<Type, TypeError> {
        let ty = self.resolve(name)?;
        if !ty.kind().is_concrete() {
            return Err(TypeError::NotAClass {
                name: name.to_string(),
                kind: ty.kind(),
            });
        }
        Ok(ty)
    }

    /// Resolve the dynamic runtime type of an instance.
    ///
    /// Works through trait objects: the entry is chosen by the instance's
    /// dynamic `TypeId`, not by any static type at the call site.
    pub fn resolve_instance(&self, instance: &dyn Any) -> Result<Type, TypeError> {
        let name = self
            .name_for_rust_id(instance.type_id())
            .ok_or(TypeError::UnregisteredInstance)?;
        self.resolve(name)
    }

    /// Resolve the class context of the indirect caller.
    ///
    /// The invoking helper's own frame is skipped
    /// ([`caller::CALLER_SKIP`]); the frame above it names the caller's
    /// class.
    pub fn resolve_caller(&self) -> Result<Type, TypeError> {
        let rust_id = caller::peek(caller::CALLER_SKIP)?;
        let name = self
            .name_for_rust_id(rust_id)
            .ok_or(TypeError::UnregisteredInstance)?;
        self.resolve(name)
    }

    /// Define a construct at runtime.
    ///
    /// Complements link-time registration for constructs whose shape is
    /// only known at runtime. Identifiers are process-unique; reusing one
    /// fails with [`TypeError::DuplicateIdentifier`]. Runtime constructs
    /// have no backing Rust type, so they resolve by identifier only.
    pub fn define(
        &self,
        name: &str,
        kind: ConstructKind,
        statics: &[(&str, StaticFn)],
    ) -> Result<Type, TypeError> {
        let mut inner = self.inner.write();
        if inner.entries.contains_key(name) || inner.descriptors.contains_key(name) {
            return Err(TypeError::DuplicateIdentifier(name.to_string()));
        }
        let name: &'static str = Box::leak(name.to_string().into_boxed_str());
        let mut methods = FxHashMap::default();
        let mut method_names = Vec::with_capacity(statics.len());
        for (method, handler) in statics {
            let method: &'static str = Box::leak(method.to_string().into_boxed_str());
            methods.insert(method, *handler);
            method_names.push(method);
        }
        let entry: &'static TypeEntry = Box::leak(Box::new(TypeEntry {
            name,
            kind,
            methods,
            method_names,
        }));
        inner.entries.insert(name, entry);
        Ok(Type::from_entry(entry))
    }

    /// Whether an identifier is known, registered or defined.
    pub fn contains(&self, name: &str) -> bool {
        let inner = self.inner.read();
        inner.entries.contains_key(name) || inner.descriptors.contains_key(name)
    }

    /// Number of identifiers known to this registry.
    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        let uninterned = inner
            .descriptors
            .keys()
            .filter(|name| !inner.entries.contains_key(*name))
            .count();
        inner.entries.len() + uninterned
    }

    /// Returns true if no construct is known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializable description of every known construct, ordered by
    /// identifier.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.read();
        let mut types: Vec<TypeSnapshot> =
            Vec::with_capacity(inner.entries.len() + inner.descriptors.len());
        for entry in inner.entries.values() {
            types.push(entry.snapshot());
        }
        for descriptor in inner.descriptors.values() {
            if !inner.entries.contains_key(descriptor.name) {
                types.push(TypeSnapshot {
                    name: descriptor.name.to_string(),
                    kind: descriptor.kind,
                    static_methods: descriptor
                        .statics
                        .iter()
                        .map(|def| def.name.to_string())
                        .collect(),
                });
            }
        }
        types.sort_by(|a, b| a.name.cmp(&b.name));
        RegistrySnapshot { types }
    }

    fn name_for_rust_id(&self, rust_id: TypeId) -> Option<&'static str> {
        self.inner.read().by_rust_id.get(&rust_id).copied()
    }

    fn entry(&self, name: &str) -> Result<&'static TypeEntry, TypeError> {
        {
            let inner = self.inner.read();
            if let Some(entry) = inner.entries.get(name).copied() {
                return Ok(entry);
            }
            if !inner.descriptors.contains_key(name) {
                return Err(TypeError::UnknownIdentifier(name.to_string()));
            }
        }

        // First resolution: intern under the write lock, re-checking in
        // case another thread interned the same identifier meanwhile.
        let mut inner = self.inner.write();
        if let Some(entry) = inner.entries.get(name).copied() {
            return Ok(entry);
        }
        let descriptor = *inner
            .descriptors
            .get(name)
            .ok_or_else(|| TypeError::UnknownIdentifier(name.to_string()))?;
        let entry: &'static TypeEntry = Box::leak(Box::new(TypeEntry::from_descriptor(descriptor)));
        inner.entries.insert(entry.name(), entry);
        Ok(entry)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
