//! Type Catalog - the resolver's read-only metadata oracle
//!
//! The catalog answers exactly three questions for the resolver core:
//!
//! ```text
//! classify(key)            -> Concrete | Abstract | unregistered
//! constructors(key)        -> ordered constructor descriptors
//! implementations_of(key)  -> ordered concrete candidates for an abstract key
//! ```
//!
//! It is populated once at startup through [`CatalogBuilder`], either by
//! explicit registration calls or by draining the compile-time component
//! registry (see [`crate::registry`]). There is no ambient runtime
//! introspection: every constructor and every interface binding is a capability
//! captured at build time. After `build()` the catalog is immutable and the
//! resolver treats it strictly as a read-only collaborator.
//!
//! Enumeration order for constructors and implementations is registration
//! order. It is stable, but callers must not read meaning into it beyond the
//! first-found-wins selection documented on the resolver.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use magus_domain::{Error, Result, TypeKey};
use tracing::warn;

use crate::constructor::{Constructor, ConstructorSpec};
use crate::instance::{Shared, erase, recover};
use crate::registry;

/// Classification of a registered type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Directly constructible - carries constructors
    Concrete,
    /// Satisfied only via a bound concrete implementation
    Abstract,
}

/// A bound implementation of an abstract type
///
/// Carries the concrete target to resolve plus the coercion from the target's
/// handle to the abstract handle, captured when the binding was registered.
pub struct ImplementationSpec {
    target: TypeKey,
    coerce: Box<dyn Fn(&Shared) -> Result<Shared> + Send + Sync>,
}

impl ImplementationSpec {
    fn new<A, C>(cast: fn(Arc<C>) -> Arc<A>) -> Self
    where
        A: ?Sized + Send + Sync + 'static,
        C: Send + Sync + 'static,
    {
        Self {
            target: TypeKey::of::<C>(),
            coerce: Box::new(move |shared| {
                let concrete =
                    recover::<C>(shared).ok_or_else(|| Error::type_mismatch(TypeKey::of::<C>()))?;
                Ok(erase(cast(concrete)))
            }),
        }
    }

    /// Key of the concrete type this binding resolves to
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Coerce a resolved instance of the target into the abstract handle
    pub(crate) fn coerce(&self, concrete: &Shared) -> Result<Shared> {
        (self.coerce)(concrete)
    }
}

impl fmt::Debug for ImplementationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationSpec")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

enum TypeEntry {
    Concrete { constructors: Vec<ConstructorSpec> },
    Abstract { implementations: Vec<ImplementationSpec> },
}

impl TypeEntry {
    fn classification(&self) -> Classification {
        match self {
            Self::Concrete { .. } => Classification::Concrete,
            Self::Abstract { .. } => Classification::Abstract,
        }
    }

    fn candidate_count(&self) -> usize {
        match self {
            Self::Concrete { constructors } => constructors.len(),
            Self::Abstract { implementations } => implementations.len(),
        }
    }
}

/// Immutable type metadata consulted by the resolver
pub struct Catalog {
    types: HashMap<TypeKey, TypeEntry>,
}

impl Catalog {
    /// Start building a catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Classify a key, or `None` when it was never registered
    pub fn classify(&self, key: &TypeKey) -> Option<Classification> {
        self.types.get(key).map(TypeEntry::classification)
    }

    /// Constructors registered for a concrete key, in registration order
    ///
    /// Empty for abstract and unregistered keys.
    pub fn constructors(&self, key: &TypeKey) -> &[ConstructorSpec] {
        match self.types.get(key) {
            Some(TypeEntry::Concrete { constructors }) => constructors,
            _ => &[],
        }
    }

    /// Bound implementations for an abstract key, in registration order
    ///
    /// Finite and restartable per call; empty for concrete and unregistered
    /// keys. Never yields the abstract key itself, since only concrete targets
    /// can be bound.
    pub fn implementations_of(&self, key: &TypeKey) -> impl Iterator<Item = &ImplementationSpec> {
        let implementations: &[ImplementationSpec] = match self.types.get(key) {
            Some(TypeEntry::Abstract { implementations }) => implementations,
            _ => &[],
        };
        implementations.iter()
    }

    /// Number of registered type entries
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no registrations at all
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Diagnostic listing of every registered entry
    ///
    /// Sorted by type name for deterministic output. Useful for host logging
    /// and CLI help.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .types
            .iter()
            .map(|(key, entry)| CatalogEntry {
                type_name: key.name(),
                classification: entry.classification(),
                candidates: entry.candidate_count(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.type_name);
        entries
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("types", &self.types.len())
            .finish()
    }
}

/// One row of the diagnostic catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name of the registered type
    pub type_name: &'static str,
    /// Concrete or abstract
    pub classification: Classification,
    /// Constructors for concrete entries, bound implementations for abstract ones
    pub candidates: usize,
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.classification {
            Classification::Concrete => "concrete",
            Classification::Abstract => "abstract",
        };
        write!(
            f,
            "{} ({kind}, {} candidate{})",
            self.type_name,
            self.candidates,
            if self.candidates == 1 { "" } else { "s" }
        )
    }
}

/// Builder for [`Catalog`]
///
/// Registration is append-only; the order of `provide` and `bind` calls fixes
/// the enumeration order the resolver sees.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use magus::CatalogBuilder;
///
/// trait Motor: Send + Sync {}
///
/// struct Engine;
/// impl Motor for Engine {}
///
/// struct Car {
///     motor: Arc<dyn Motor>,
/// }
///
/// let catalog = CatalogBuilder::new()
///     .provide(|| Engine)
///     .bind::<dyn Motor, Engine>(|engine| engine)
///     .provide(|motor: Arc<dyn Motor>| Car { motor })
///     .build();
///
/// assert_eq!(catalog.len(), 3);
/// ```
#[derive(Default)]
pub struct CatalogBuilder {
    types: HashMap<TypeKey, TypeEntry>,
}

impl CatalogBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for a concrete type
    ///
    /// The closure's `Arc<P>` parameters declare the ordered dependency list;
    /// its return value is the constructed component. Repeated calls for the
    /// same output type append further constructor candidates in order.
    pub fn provide<Args, F>(mut self, constructor: F) -> Self
    where
        F: Constructor<Args>,
    {
        let key = TypeKey::of::<F::Output>();
        match self
            .types
            .entry(key)
            .or_insert_with(|| TypeEntry::Concrete {
                constructors: Vec::new(),
            }) {
            TypeEntry::Concrete { constructors } => {
                constructors.push(ConstructorSpec::new(constructor));
            }
            TypeEntry::Abstract { .. } => {
                // First classification wins; a key cannot be both.
                warn!(
                    "ignoring constructor for {key}: already registered as an abstract type"
                );
            }
        }
        self
    }

    /// Register a concrete type with zero constructors
    ///
    /// Models a type whose constructors are all inaccessible: classification
    /// succeeds but resolution fails with `NoAccessibleConstructor`.
    pub fn component<T: Send + Sync + 'static>(mut self) -> Self {
        self.types
            .entry(TypeKey::of::<T>())
            .or_insert_with(|| TypeEntry::Concrete {
                constructors: Vec::new(),
            });
        self
    }

    /// Declare an abstract type without binding any implementation
    ///
    /// Classification succeeds but resolution fails with
    /// `NoImplementationFound` until a `bind` call adds a candidate.
    pub fn interface<A: ?Sized + Send + Sync + 'static>(mut self) -> Self {
        self.types
            .entry(TypeKey::of::<A>())
            .or_insert_with(|| TypeEntry::Abstract {
                implementations: Vec::new(),
            });
        self
    }

    /// Bind concrete type `C` as an implementation of abstract type `A`
    ///
    /// The `cast` function performs the unsizing coercion; an identity closure
    /// at the call site is all that is needed:
    ///
    /// ```ignore
    /// builder.bind::<dyn Motor, Engine>(|engine| engine)
    /// ```
    ///
    /// `bind` does not register constructors for `C`; pair it with `provide`.
    /// Repeated calls append candidates in order, but multiple bindings for
    /// one abstract type are unsupported: selection is first-registered-wins.
    pub fn bind<A, C>(mut self, cast: fn(Arc<C>) -> Arc<A>) -> Self
    where
        A: ?Sized + Send + Sync + 'static,
        C: Send + Sync + 'static,
    {
        let key = TypeKey::of::<A>();
        match self
            .types
            .entry(key)
            .or_insert_with(|| TypeEntry::Abstract {
                implementations: Vec::new(),
            }) {
            TypeEntry::Abstract { implementations } => {
                implementations.push(ImplementationSpec::new(cast));
            }
            TypeEntry::Concrete { .. } => {
                warn!("ignoring binding for {key}: already registered as a concrete type");
            }
        }
        self
    }

    /// Apply every install function collected in the compile-time registry
    ///
    /// Entries are applied in slice order; see [`crate::registry`].
    pub fn install_registered(self) -> Self {
        registry::install_all(self)
    }

    /// Finish building
    pub fn build(self) -> Catalog {
        Catalog { types: self.types }
    }
}

impl fmt::Debug for CatalogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogBuilder")
            .field("types", &self.types.len())
            .finish()
    }
}
