//! Tests for concurrent resolution
//!
//! The resolver takes no locks around the resolution algorithm; only the
//! cache's insert-or-fetch is atomic. Duplicate concurrent construction is
//! tolerated, duplicate retention is not: all callers end up holding the one
//! retained instance per key.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use magus::{CatalogBuilder, Resolver};

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

struct Counted;

impl Counted {
    fn new() -> Self {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Counted
    }
}

#[test]
fn test_concurrent_cached_resolution_retains_one_instance() {
    let resolver = Arc::new(Resolver::new(
        CatalogBuilder::new().provide(Counted::new).build(),
    ));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || resolver.resolve::<Counted>().expect("resolve should succeed"))
        })
        .collect();

    let instances: Vec<Arc<Counted>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread should not panic"))
        .collect();

    let first = &instances[0];
    assert!(
        instances.iter().all(|instance| Arc::ptr_eq(instance, first)),
        "every thread must receive the same retained instance"
    );
    assert_eq!(resolver.cached_instances(), 1);

    // Lost-update on the value is acceptable: several threads may have
    // constructed, but at least one construction must have happened and
    // exactly one instance is retained.
    assert!(CONSTRUCTIONS.load(Ordering::SeqCst) >= 1);
}

#[test]
fn test_concurrent_resolution_of_shared_dependency_graph() {
    #[derive(Default)]
    struct Leaf;
    struct Branch {
        leaf: Arc<Leaf>,
    }

    let resolver = Arc::new(Resolver::new(
        CatalogBuilder::new()
            .provide(Leaf::default)
            .provide(|leaf: Arc<Leaf>| Branch { leaf })
            .build(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || resolver.resolve::<Branch>().expect("resolve should succeed"))
        })
        .collect();

    let branches: Vec<Arc<Branch>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread should not panic"))
        .collect();

    let first = &branches[0];
    assert!(branches.iter().all(|branch| Arc::ptr_eq(branch, first)));
    assert!(
        branches
            .iter()
            .all(|branch| Arc::ptr_eq(&branch.leaf, &first.leaf)),
        "the shared Leaf singleton must be identical everywhere"
    );
    assert_eq!(resolver.cached_instances(), 2);
}
