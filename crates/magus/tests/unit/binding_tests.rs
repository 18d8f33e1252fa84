//! Tests for abstract-type resolution
//!
//! Mirrors the interface scenarios of the engine contract: an abstract type
//! resolves through its bound concrete implementation, is cached under the
//! abstract key, and fails with `NoImplementationFound` when nothing is bound.

use std::sync::Arc;

use magus::{CatalogBuilder, Error, Resolver};

trait NotImplemented: Send + Sync + std::fmt::Debug {}

trait Implemented: Send + Sync {
    fn id(&self) -> &'static str;
}

#[derive(Default)]
struct TheImplementation;

impl Implemented for TheImplementation {
    fn id(&self) -> &'static str {
        "the-implementation"
    }
}

fn resolver_with_implementation() -> Resolver {
    Resolver::new(
        CatalogBuilder::new()
            .provide(TheImplementation::default)
            .bind::<dyn Implemented, TheImplementation>(|concrete| concrete)
            .build(),
    )
}

#[test]
fn test_abstract_type_with_no_implementation_fails() {
    let resolver = Resolver::new(
        CatalogBuilder::new()
            // Declared as abstract, but nothing ever bound to it.
            .interface::<dyn NotImplemented>()
            .build(),
    );

    let err = resolver
        .resolve::<dyn NotImplemented>()
        .expect_err("unimplemented abstract type must not resolve");
    assert!(
        matches!(err, Error::NoImplementationFound { .. }),
        "expected NoImplementationFound, got {err:?}"
    );
}

#[test]
fn test_undeclared_abstract_type_is_unknown() {
    let resolver = Resolver::new(CatalogBuilder::new().build());
    let err = resolver
        .resolve::<dyn NotImplemented>()
        .expect_err("undeclared abstract type must not resolve");
    // Never registered at all, so the catalog cannot even classify it.
    assert!(matches!(err, Error::UnknownType { .. }));
}

#[test]
fn test_bound_abstract_type_with_unconstructible_target_fails() {
    #[derive(Debug)]
    struct Unbuildable;
    trait Port: Send + Sync + std::fmt::Debug {}
    impl Port for Unbuildable {}

    let resolver = Resolver::new(
        CatalogBuilder::new()
            .component::<Unbuildable>()
            .bind::<dyn Port, Unbuildable>(|concrete| concrete)
            .build(),
    );

    let err = resolver
        .resolve::<dyn Port>()
        .expect_err("binding whose target cannot construct must not resolve");
    assert!(
        matches!(err, Error::NoImplementationFound { .. }),
        "expected NoImplementationFound, got {err:?}"
    );
}

#[test]
fn test_abstract_type_resolves_to_bound_implementation() {
    let resolver = resolver_with_implementation();
    let implemented = resolver
        .resolve::<dyn Implemented>()
        .expect("bound abstract type should resolve");
    assert_eq!(implemented.id(), "the-implementation");
}

#[test]
fn test_abstract_type_resolves_to_same_instance_every_time() {
    let resolver = resolver_with_implementation();
    let first = resolver.resolve::<dyn Implemented>().expect("first resolve");
    let second = resolver.resolve::<dyn Implemented>().expect("second resolve");
    assert!(
        Arc::ptr_eq(&first, &second),
        "abstract requests are cached under the abstract key"
    );
}

#[test]
fn test_abstract_and_concrete_requests_share_one_construction() {
    let resolver = resolver_with_implementation();

    let via_interface = resolver
        .resolve::<dyn Implemented>()
        .expect("abstract resolve");
    let via_concrete = resolver
        .resolve::<TheImplementation>()
        .expect("concrete resolve");

    // The implementation search resolves the concrete target Cached, so the
    // concrete key is populated by the abstract request and both handles
    // point at the same underlying object.
    let interface_ptr = Arc::as_ptr(&via_interface).cast::<TheImplementation>();
    assert!(
        std::ptr::eq(interface_ptr, Arc::as_ptr(&via_concrete)),
        "abstract and concrete requests should share the same construction"
    );
    assert_eq!(
        resolver.cached_instances(),
        2,
        "one entry under the abstract key, one under the concrete key"
    );
}

#[test]
fn test_implementation_depending_on_other_abstract_types_resolves() {
    trait Left: Send + Sync {}
    trait Right: Send + Sync {}
    trait Whole: Send + Sync {}

    #[derive(Default)]
    struct LeftImpl;
    impl Left for LeftImpl {}

    #[derive(Default)]
    struct RightImpl;
    impl Right for RightImpl {}

    struct WholeImpl {
        _left: Arc<dyn Left>,
        _right: Arc<dyn Right>,
    }
    impl Whole for WholeImpl {}

    let resolver = Resolver::new(
        CatalogBuilder::new()
            .provide(LeftImpl::default)
            .bind::<dyn Left, LeftImpl>(|concrete| concrete)
            .provide(RightImpl::default)
            .bind::<dyn Right, RightImpl>(|concrete| concrete)
            .provide(|left: Arc<dyn Left>, right: Arc<dyn Right>| WholeImpl {
                _left: left,
                _right: right,
            })
            .bind::<dyn Whole, WholeImpl>(|concrete| concrete)
            .build(),
    );

    assert!(
        resolver.resolve::<dyn Whole>().is_ok(),
        "abstract dependencies of an implementation should resolve transitively"
    );
}

#[test]
fn test_multiple_bindings_first_registered_wins() {
    trait Port: Send + Sync {
        fn tag(&self) -> &'static str;
    }

    #[derive(Default)]
    struct First;
    impl Port for First {
        fn tag(&self) -> &'static str {
            "first"
        }
    }

    #[derive(Default)]
    struct Second;
    impl Port for Second {
        fn tag(&self) -> &'static str {
            "second"
        }
    }

    // Ambiguous setups are unsupported; selection follows registration order.
    let resolver = Resolver::new(
        CatalogBuilder::new()
            .provide(First::default)
            .provide(Second::default)
            .bind::<dyn Port, First>(|concrete| concrete)
            .bind::<dyn Port, Second>(|concrete| concrete)
            .build(),
    );

    let port = resolver.resolve::<dyn Port>().expect("should resolve");
    assert_eq!(port.tag(), "first");
}

#[test]
fn test_unresolvable_binding_falls_through_to_next_candidate() {
    trait Port: Send + Sync {
        fn tag(&self) -> &'static str;
    }

    struct Broken;
    impl Port for Broken {
        fn tag(&self) -> &'static str {
            "broken"
        }
    }

    #[derive(Default)]
    struct Working;
    impl Port for Working {
        fn tag(&self) -> &'static str {
            "working"
        }
    }

    // Broken has no constructors; the search moves on to Working.
    let resolver = Resolver::new(
        CatalogBuilder::new()
            .component::<Broken>()
            .provide(Working::default)
            .bind::<dyn Port, Broken>(|concrete| concrete)
            .bind::<dyn Port, Working>(|concrete| concrete)
            .build(),
    );

    let port = resolver.resolve::<dyn Port>().expect("should resolve");
    assert_eq!(port.tag(), "working");
}
