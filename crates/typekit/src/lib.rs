//! Canonical runtime type identity
//!
//! Rust has no ambient reflection, so this crate provides the registry
//! that stands in for it: programs declare their classes, interfaces,
//! and trait markers to a process-wide type universe, then resolve them
//! to canonical `Type` handles that compare by identity.
//!
//! - **Registration**: `register_class!`, `register_interface!`, and
//!   `register_trait!` submit link-time descriptors; [`TypeRegistry::define`]
//!   admits constructs whose shape is only known at runtime
//! - **Resolution**: by identifier ([`Type::resolve`],
//!   [`Type::resolve_class`]), by instance ([`Type::from_instance`]), or
//!   by caller context ([`Type::from_caller`])
//! - **Dispatch**: dynamic static-method invocation by name
//!   ([`Type::invoke_static`] and the `static_call!` sugar)
//! - **Reflection**: read-only [`ClassReflection`] handles and
//!   serializable snapshots
//!
//! # Example
//!
//! ```rust,ignore
//! use typekit::{register_class, type_identifier, Type, Value};
//!
//! struct Greeter;
//! register_class!(Greeter, statics: [
//!     "greet" => |args| args.first().cloned().unwrap_or(Value::Null),
//! ]);
//!
//! let ty = Type::resolve_class(type_identifier!(Greeter))?;
//! assert_eq!(ty.invoke_static("greet", &["hi".into()])?, Value::from("hi"));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod caller;
pub mod descriptor;
pub mod error;
pub mod reflect;
pub mod registry;
pub mod ty;
pub mod value;

mod macros;

// Re-exported for macro expansions.
#[doc(hidden)]
pub use inventory;

pub use caller::{ClassFrame, CALLER_SKIP};
pub use descriptor::{ConstructKind, StaticFn, StaticMethodDef, TypeDescriptor, TypeDescriptorReg};
pub use error::TypeError;
pub use reflect::{ClassReflection, RegistrySnapshot, TypeSnapshot};
pub use registry::{TypeEntry, TypeRegistry};
pub use ty::Type;
pub use value::Value;
