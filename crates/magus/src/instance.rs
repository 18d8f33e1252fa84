//! Shared instance representation
//!
//! One type-erased shape flows through the whole engine: a [`Shared`] whose
//! `Any` payload is always the `Arc<T>` handle for the key it was stored
//! under. Keeping the payload an `Arc<T>` (rather than a bare `T`) is what
//! lets `dyn Trait` keys round-trip, since `Arc<dyn Trait>` is itself a sized
//! type that `Any` can carry.

use std::any::Any;
use std::sync::Arc;

/// Type-erased instance as held by the cache and passed between resolution steps
pub(crate) type Shared = Arc<dyn Any + Send + Sync>;

/// Erase an `Arc<T>` handle into the shared representation
pub(crate) fn erase<T>(handle: Arc<T>) -> Shared
where
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(handle)
}

/// Recover the `Arc<T>` handle from a shared instance
///
/// Returns `None` when the payload was stored for a different type, which the
/// typed registration surface rules out short of a builder-invariant breach.
pub(crate) fn recover<T>(shared: &Shared) -> Option<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    shared.downcast_ref::<Arc<T>>().cloned()
}
