//! Resolver core
//!
//! Orchestrates the whole resolution pipeline against an immutable
//! [`Catalog`] and an owned instance cache:
//!
//! ```text
//! resolve::<T>(policy)
//!       │
//!       ▼
//! cache lookup (Cached only) ──hit──▶ shared singleton
//!       │ miss
//!       ▼
//! classify via catalog
//!       │
//!       ├─ Concrete ─▶ parameterless constructor, else first constructor
//!       │              whose parameters all resolve (each parameter recurses
//!       │              through this same entry point, always Cached)
//!       │
//!       └─ Abstract ─▶ first bound implementation that fully resolves,
//!                      coerced to the abstract handle
//!       │
//!       ▼
//! idempotent cache insert (Cached only), keyed by the requested type
//! ```
//!
//! A request either returns a fully-constructed instance or fails with the
//! proximate error cause; nothing partial is ever cached or returned. The
//! call chain is synchronous and non-suspending, so recursion depth equals
//! dependency-graph depth, and a per-call-chain in-flight set turns dependency
//! cycles into [`Error::CyclicDependency`] instead of unbounded recursion.

use std::sync::Arc;

use magus_domain::{CachePolicy, Error, Result, TypeKey};
use tracing::{debug, trace};

use crate::cache::InstanceCache;
use crate::catalog::{Catalog, Classification};
use crate::constructor::ConstructorSpec;
use crate::instance::{Shared, recover};

/// Failures that abort the whole request instead of rejecting one candidate
///
/// A dependency cycle or a broken registration invariant cannot be repaired
/// by trying the next constructor or binding, and swallowing it into
/// `UnsatisfiableDependencies` would hide the real cause from the caller.
fn is_fatal(error: &Error) -> bool {
    matches!(
        error,
        Error::CyclicDependency { .. } | Error::TypeMismatch { .. }
    )
}

/// Tracks the types currently being resolved on this call chain
///
/// Lives on the stack of one top-level `resolve` call and is never shared, so
/// two threads resolving the same type concurrently cannot observe a false
/// cycle.
#[derive(Default)]
struct ResolutionChain {
    in_flight: Vec<TypeKey>,
}

impl ResolutionChain {
    fn enter(&mut self, key: TypeKey) -> Result<()> {
        if self.in_flight.contains(&key) {
            return Err(Error::cyclic_dependency(key, self.render(key)));
        }
        self.in_flight.push(key);
        Ok(())
    }

    fn exit(&mut self) {
        self.in_flight.pop();
    }

    /// Render the chain as `A -> B -> A` for diagnostics
    fn render(&self, closing: TypeKey) -> String {
        let mut names: Vec<&str> = self.in_flight.iter().map(TypeKey::name).collect();
        names.push(closing.name());
        names.join(" -> ")
    }
}

/// The dependency resolver
///
/// Owns the catalog and an internal instance cache; independent resolvers
/// have fully independent caches, and dropping the resolver drops every
/// cached instance. Callers receive shared `Arc<T>` handles while the cache
/// keeps the long-lived clone.
///
/// `Resolver` is `Send + Sync`; `resolve` may be called concurrently from
/// many threads. The cache's insert-or-fetch is the only synchronized
/// operation - the resolution algorithm itself takes no locks, so duplicate
/// concurrent construction can happen, but only one instance per key is ever
/// retained.
pub struct Resolver {
    catalog: Catalog,
    cache: InstanceCache,
}

impl Resolver {
    /// Create a resolver over a built catalog with an empty cache
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cache: InstanceCache::default(),
        }
    }

    /// Resolve a shared singleton of `T`
    ///
    /// Equivalent to [`Self::resolve_with`] with [`CachePolicy::Cached`]:
    /// repeated calls return clones of the identical `Arc`.
    pub fn resolve<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with(CachePolicy::Cached)
    }

    /// Resolve an instance of `T` under an explicit cache policy
    ///
    /// The sole entry point. `Fresh` bypasses the cache lookup and does not
    /// retain the result, but dependencies are still resolved `Cached`, so a
    /// fresh object's dependencies are shared singletons.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use magus::{CachePolicy, CatalogBuilder, Resolver};
    ///
    /// #[derive(Default)]
    /// struct Clock;
    ///
    /// let resolver = Resolver::new(CatalogBuilder::new().provide(Clock::default).build());
    ///
    /// let shared: Arc<Clock> = resolver.resolve()?;
    /// let fresh: Arc<Clock> = resolver.resolve_with(CachePolicy::Fresh)?;
    /// assert!(!Arc::ptr_eq(&shared, &fresh));
    /// # Ok::<(), magus::Error>(())
    /// ```
    pub fn resolve_with<T>(&self, policy: CachePolicy) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let mut chain = ResolutionChain::default();
        let instance = self.resolve_key(key, policy, &mut chain)?;
        recover::<T>(&instance).ok_or_else(|| Error::type_mismatch(key))
    }

    /// Read access to the catalog, for host diagnostics
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of instances currently cached
    pub fn cached_instances(&self) -> usize {
        self.cache.len()
    }

    /// Recursive entry point shared by top-level requests and parameters
    fn resolve_key(
        &self,
        key: TypeKey,
        policy: CachePolicy,
        chain: &mut ResolutionChain,
    ) -> Result<Shared> {
        if policy == CachePolicy::Cached {
            if let Some(hit) = self.cache.get(&key) {
                trace!("cache hit for {key}");
                return Ok(hit);
            }
        }

        chain.enter(key)?;
        let constructed = self.construct(key, chain);
        chain.exit();
        let instance = constructed?;

        if policy == CachePolicy::Cached {
            // Idempotent: a concurrent resolution may have inserted first, in
            // which case the existing instance wins and ours is discarded.
            debug!("caching instance for {key}");
            return Ok(self.cache.insert_or_get(key, instance));
        }
        Ok(instance)
    }

    fn construct(&self, key: TypeKey, chain: &mut ResolutionChain) -> Result<Shared> {
        match self.catalog.classify(&key) {
            Some(Classification::Concrete) => self.construct_concrete(key, chain),
            Some(Classification::Abstract) => self.find_implementation(key, chain),
            None => Err(Error::unknown_type(key)),
        }
    }

    /// Constructor selection for a concrete type
    ///
    /// A parameterless constructor takes absolute priority regardless of
    /// registration order. Otherwise the first constructor whose parameters
    /// all resolve wins - no backtracking, no best-fit scoring.
    fn construct_concrete(&self, key: TypeKey, chain: &mut ResolutionChain) -> Result<Shared> {
        let constructors = self.catalog.constructors(&key);
        if constructors.is_empty() {
            return Err(Error::no_accessible_constructor(key));
        }

        if let Some(parameterless) = constructors.iter().find(|c| c.is_parameterless()) {
            trace!("constructing {key} with its parameterless constructor");
            return parameterless.construct(&[]);
        }

        for (index, constructor) in constructors.iter().enumerate() {
            match self.resolve_parameters(constructor, chain) {
                Ok(arguments) => {
                    trace!("constructing {key} with constructor #{index}");
                    return constructor.construct(&arguments);
                }
                Err(cause) if is_fatal(&cause) => return Err(cause),
                Err(cause) => {
                    trace!("constructor #{index} of {key} rejected: {cause}");
                }
            }
        }
        Err(Error::unsatisfiable_dependencies(key))
    }

    /// Resolve every parameter of one constructor, in declared order
    ///
    /// Always `Cached`: only the top-level object can be `Fresh`. The first
    /// failure aborts the attempt; already-resolved siblings are dropped,
    /// though their own cache entries persist.
    fn resolve_parameters(
        &self,
        constructor: &ConstructorSpec,
        chain: &mut ResolutionChain,
    ) -> Result<Vec<Shared>> {
        constructor
            .parameters()
            .iter()
            .map(|parameter| self.resolve_key(*parameter, CachePolicy::Cached, chain))
            .collect()
    }

    /// Implementation search for an abstract type
    ///
    /// First bound implementation that fully resolves wins. With multiple
    /// bindings the choice follows registration order; such setups are
    /// unsupported and the selection is simply first-found.
    fn find_implementation(&self, key: TypeKey, chain: &mut ResolutionChain) -> Result<Shared> {
        for implementation in self.catalog.implementations_of(&key) {
            match self.resolve_key(implementation.target(), CachePolicy::Cached, chain) {
                Ok(concrete) => {
                    debug!("resolved {key} via implementation {}", implementation.target());
                    return implementation.coerce(&concrete);
                }
                Err(cause) if is_fatal(&cause) => return Err(cause),
                Err(cause) => {
                    trace!(
                        "implementation {} rejected for {key}: {cause}",
                        implementation.target()
                    );
                }
            }
        }
        Err(Error::no_implementation_found(key))
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("catalog", &self.catalog)
            .field("cached_instances", &self.cache.len())
            .finish()
    }
}
