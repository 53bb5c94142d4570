//! Integration tests for canonical type resolution, static dispatch,
//! caller resolution, and reflection.

use std::any::Any;

use typekit::{
    class_frame, register_class, register_interface, register_trait, static_call,
    type_identifier, ConstructKind, Type, TypeError, TypeRegistry, Value,
};

// ============================================================================
// Fixtures
// ============================================================================

struct ExistingClass;
register_class!(ExistingClass);

trait Describable {
    #[allow(dead_code)]
    fn describe(&self) -> String;
}
register_interface!(Describable);

trait Mixin {
    #[allow(dead_code)]
    fn mix(&self);
}
register_trait!(Mixin);

struct ClassWithStaticMethod;
register_class!(ClassWithStaticMethod, statics: [
    "static_method" => |args| args.first().cloned().unwrap_or(Value::Null),
]);

struct SelfReporting;
register_class!(SelfReporting);

impl SelfReporting {
    fn get_type() -> Result<Type, TypeError> {
        class_frame!(SelfReporting);
        Self::call_from_caller()
    }

    fn call_from_caller() -> Result<Type, TypeError> {
        class_frame!(SelfReporting);
        Type::from_caller()
    }
}

const EXISTING_CLASS: &str = type_identifier!(ExistingClass);
const DESCRIBABLE: &str = type_identifier!(Describable);
const MIXIN: &str = type_identifier!(Mixin);
const CLASS_WITH_STATIC_METHOD: &str = type_identifier!(ClassWithStaticMethod);
const SELF_REPORTING: &str = type_identifier!(SelfReporting);

fn anonymous_instance() -> impl Any {
    struct Anonymous;
    register_class!(anon Anonymous);
    Anonymous
}

fn other_anonymous_instance() -> impl Any {
    struct Anonymous;
    register_class!(anon Anonymous);
    Anonymous
}

fn anonymous_with_static_instance() -> impl Any {
    struct Anonymous;
    register_class!(anon Anonymous, statics: [
        "static_method" => |args| args.first().cloned().unwrap_or(Value::Null),
    ]);
    Anonymous
}

// ============================================================================
// Identifier resolution
// ============================================================================

mod identifier_resolution {
    use super::*;

    #[test]
    fn test_resolution_is_canonical() {
        let first = Type::resolve_class(EXISTING_CLASS).unwrap();
        let second = Type::resolve_class(EXISTING_CLASS).unwrap();
        assert_eq!(first, second);

        // The any-construct path shares the same canonical entry.
        let by_any = Type::resolve(EXISTING_CLASS).unwrap();
        assert_eq!(first, by_any);
    }

    #[test]
    fn test_non_existing_class_is_rejected() {
        assert_eq!(
            Type::resolve_class("NonExistingClass"),
            Err(TypeError::UnknownIdentifier("NonExistingClass".to_string()))
        );
    }

    #[test]
    fn test_interface_is_rejected_by_class_resolution() {
        assert_eq!(
            Type::resolve_class(DESCRIBABLE),
            Err(TypeError::NotAClass {
                name: DESCRIBABLE.to_string(),
                kind: ConstructKind::Interface,
            })
        );

        let describable = Type::resolve(DESCRIBABLE).unwrap();
        assert_eq!(describable.kind(), ConstructKind::Interface);
    }

    #[test]
    fn test_trait_marker_is_rejected_by_class_resolution() {
        assert_eq!(
            Type::resolve_class(MIXIN),
            Err(TypeError::NotAClass {
                name: MIXIN.to_string(),
                kind: ConstructKind::Trait,
            })
        );

        let mixin = Type::resolve(MIXIN).unwrap();
        assert_eq!(mixin.kind(), ConstructKind::Trait);
    }
}

// ============================================================================
// Instance resolution
// ============================================================================

mod instance_resolution {
    use super::*;

    #[test]
    fn test_instance_matches_identifier_resolution() {
        let instance = ExistingClass;
        let by_instance = Type::from_instance(&instance).unwrap();
        let by_name = Type::resolve_class(EXISTING_CLASS).unwrap();
        assert_eq!(by_instance, by_name);
    }

    #[test]
    fn test_same_site_anonymous_instances_share_a_type() {
        let first = anonymous_instance();
        let second = anonymous_instance();
        assert_eq!(
            Type::from_instance(&first).unwrap(),
            Type::from_instance(&second).unwrap()
        );
    }

    #[test]
    fn test_distinct_sites_produce_distinct_types() {
        let first = anonymous_instance();
        let other = other_anonymous_instance();
        assert_ne!(
            Type::from_instance(&first).unwrap(),
            Type::from_instance(&other).unwrap()
        );
    }

    #[test]
    fn test_unregistered_instance_is_rejected() {
        struct NeverRegistered;
        let instance = NeverRegistered;
        assert_eq!(
            Type::from_instance(&instance),
            Err(TypeError::UnregisteredInstance)
        );
    }
}

// ============================================================================
// Static dispatch
// ============================================================================

mod static_dispatch {
    use super::*;

    #[test]
    fn test_static_method_returns_its_argument() {
        let class = Type::resolve_class(CLASS_WITH_STATIC_METHOD).unwrap();
        assert_eq!(
            class.invoke_static("static_method", &["foo".into()]),
            Ok(Value::String("foo".to_string()))
        );
        assert_eq!(
            static_call!(class, static_method("foo")),
            Ok(Value::String("foo".to_string()))
        );
    }

    #[test]
    fn test_non_existing_static_method_is_rejected() {
        let class = Type::resolve_class(CLASS_WITH_STATIC_METHOD).unwrap();
        let expected = Err(TypeError::UnknownStaticMethod {
            class: CLASS_WITH_STATIC_METHOD.to_string(),
            method: "non_existing_static_method".to_string(),
        });

        assert_eq!(class.invoke_static("non_existing_static_method", &[]), expected);
        assert_eq!(static_call!(class, non_existing_static_method()), expected);
    }

    #[test]
    fn test_anonymous_class_static_dispatch() {
        let instance = anonymous_with_static_instance();
        let class = Type::from_instance(&instance).unwrap();

        assert_eq!(
            class.invoke_static("static_method", &["foo".into()]),
            Ok(Value::String("foo".to_string()))
        );
        assert!(matches!(
            class.invoke_static("non_existing_static_method", &[]),
            Err(TypeError::UnknownStaticMethod { .. })
        ));
    }
}

// ============================================================================
// Caller resolution
// ============================================================================

mod caller_resolution {
    use super::*;

    #[test]
    fn test_static_method_obtains_its_own_type() {
        let expected = Type::resolve_class(SELF_REPORTING).unwrap();
        assert_eq!(SelfReporting::get_type(), Ok(expected));
    }

    #[test]
    fn test_caller_resolution_needs_a_frame_above_the_helper() {
        // Only the helper's own frame exists, so there is no caller to
        // report.
        class_frame!(SelfReporting);
        assert_eq!(Type::from_caller(), Err(TypeError::NoCallerContext(1)));
    }
}

// ============================================================================
// Runtime definition and reflection
// ============================================================================

mod runtime_definition {
    use super::*;

    #[test]
    fn test_define_resolves_like_linked_registrations() {
        let ty = TypeRegistry::global()
            .define(
                "dynamic::LateBound",
                ConstructKind::Class,
                &[("static_method", |args: &[Value]| {
                    args.first().cloned().unwrap_or(Value::Null)
                })],
            )
            .unwrap();

        assert_eq!(Type::resolve_class("dynamic::LateBound"), Ok(ty));
        assert_eq!(
            ty.invoke_static("static_method", &["foo".into()]),
            Ok(Value::String("foo".to_string()))
        );
    }

    #[test]
    fn test_redefinition_is_rejected() {
        let registry = TypeRegistry::new();
        registry
            .define("dynamic::Once", ConstructKind::Class, &[])
            .unwrap();
        assert_eq!(
            registry.define("dynamic::Once", ConstructKind::Class, &[]),
            Err(TypeError::DuplicateIdentifier("dynamic::Once".to_string()))
        );
    }
}

mod reflection {
    use super::*;

    #[test]
    fn test_reflection_handle_describes_the_class() {
        let reflection = Type::resolve_class(CLASS_WITH_STATIC_METHOD)
            .unwrap()
            .reflect();

        assert_eq!(reflection.name(), CLASS_WITH_STATIC_METHOD);
        assert_eq!(reflection.kind(), ConstructKind::Class);
        assert_eq!(reflection.static_method_names(), &["static_method"]);
        assert!(reflection.has_static_method("static_method"));
        assert!(!reflection.has_static_method("non_existing_static_method"));
    }

    #[test]
    fn test_registry_snapshot_lists_defined_constructs() {
        let registry = TypeRegistry::new();
        registry
            .define("snapshot::Shape", ConstructKind::Class, &[])
            .unwrap();
        registry
            .define("snapshot::Drawable", ConstructKind::Interface, &[])
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&registry.snapshot().to_json().unwrap()).unwrap();
        assert_eq!(json["types"][0]["name"], "snapshot::Drawable");
        assert_eq!(json["types"][0]["kind"], "interface");
        assert_eq!(json["types"][1]["name"], "snapshot::Shape");
        assert_eq!(json["types"][1]["kind"], "class");
    }
}
