//! Registration and dispatch macros
//!
//! `register_class!` and friends build a `TypeDescriptor` at the call
//! site and submit it to the link-time universe collected by the global
//! registry. `class_frame!` enters a caller-context frame for the
//! enclosing scope, and `static_call!` is the dispatch sugar over
//! [`crate::Type::invoke_static`].

/// Expands to the registration identifier of a type named at the call
/// site: the call-site module path plus the type name.
#[macro_export]
macro_rules! type_identifier {
    ($ty:ty) => {
        concat!(module_path!(), "::", stringify!($ty))
    };
}

/// Registers a concrete class with the link-time type universe.
///
/// The identifier is the call-site module path plus the type name. The
/// `anon` form appends `@file:line`, giving function-local constructs a
/// site-stable identifier. Static methods are declared as
/// `"name" => handler` pairs, each handler a `fn(&[Value]) -> Value`.
#[macro_export]
macro_rules! register_class {
    ($ty:ty) => {
        $crate::register_class!($ty, statics: []);
    };
    ($ty:ty, statics: [ $( $method:literal => $handler:expr ),* $(,)? ]) => {
        $crate::__submit_descriptor!(
            $crate::type_identifier!($ty),
            $crate::ConstructKind::Class,
            $ty,
            [ $( $method => $handler ),* ]
        );
    };
    (anon $ty:ty) => {
        $crate::register_class!(anon $ty, statics: []);
    };
    (anon $ty:ty, statics: [ $( $method:literal => $handler:expr ),* $(,)? ]) => {
        $crate::__submit_descriptor!(
            concat!(module_path!(), "::", stringify!($ty), "@", file!(), ":", line!()),
            $crate::ConstructKind::Class,
            $ty,
            [ $( $method => $handler ),* ]
        );
    };
}

/// Registers an object-safe trait as an interface construct.
///
/// Interfaces resolve through [`crate::Type::resolve`] but are rejected
/// by class resolution. Identity is backed by the trait object type, so
/// the trait must be object safe.
#[macro_export]
macro_rules! register_interface {
    ($tr:ident) => {
        $crate::__submit_descriptor!(
            concat!(module_path!(), "::", stringify!($tr)),
            $crate::ConstructKind::Interface,
            dyn $tr,
            []
        );
    };
}

/// Registers an object-safe trait as a behavior-mixin marker.
///
/// Like interfaces, trait markers resolve through
/// [`crate::Type::resolve`] and are rejected by class resolution.
#[macro_export]
macro_rules! register_trait {
    ($tr:ident) => {
        $crate::__submit_descriptor!(
            concat!(module_path!(), "::", stringify!($tr)),
            $crate::ConstructKind::Trait,
            dyn $tr,
            []
        );
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __submit_descriptor {
    ($name:expr, $kind:expr, $ty:ty, [ $( $method:literal => $handler:expr ),* ]) => {
        const _: () = {
            static STATICS: &[$crate::StaticMethodDef] = &[
                $( $crate::StaticMethodDef { name: $method, invoke: $handler } ),*
            ];
            static DESCRIPTOR: $crate::TypeDescriptor = $crate::TypeDescriptor {
                name: $name,
                kind: $kind,
                rust_id: ::std::any::TypeId::of::<$ty>,
                statics: STATICS,
            };
            $crate::inventory::submit! {
                $crate::TypeDescriptorReg(&DESCRIPTOR)
            };
        };
    };
}

/// Enters a class-context frame for the rest of the enclosing scope.
///
/// Expands to a `let` binding holding a [`crate::ClassFrame`] guard; the
/// frame pops at scope exit.
#[macro_export]
macro_rules! class_frame {
    ($ty:ty) => {
        let _frame = $crate::ClassFrame::enter::<$ty>();
    };
}

/// Dynamic-dispatch sugar over [`crate::Type::invoke_static`].
///
/// `static_call!(ty, method("foo", 2))` forwards to
/// `ty.invoke_static("method", &["foo".into(), 2.into()])`. Unknown
/// method names surface as [`crate::TypeError::UnknownStaticMethod`],
/// exactly as with the explicit call.
#[macro_export]
macro_rules! static_call {
    ($ty:expr, $method:ident ( $( $arg:expr ),* $(,)? )) => {
        $ty.invoke_static(
            stringify!($method),
            &[ $( $crate::Value::from($arg) ),* ],
        )
    };
}
