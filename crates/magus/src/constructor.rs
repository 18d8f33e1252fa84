//! Constructor descriptors
//!
//! A constructor is described by its ordered parameter keys plus a factory
//! capability decided at catalog-build time: registration captures a typed
//! closure once, so construction never probes types at runtime.
//!
//! The [`Constructor`] trait is implemented for plain functions and closures
//! of arity 0..=8 whose parameters are `Arc<P>` handles. The parameter types
//! are read off the closure signature, so registering
//! `|engine: Arc<dyn Motor>| Car::new(engine)` declares a one-parameter
//! constructor for `Car` with `dyn Motor` as its dependency.

use std::sync::Arc;

use magus_domain::{Error, Result, TypeKey};

use crate::instance::{Shared, erase, recover};

/// A registerable construction function
///
/// `Args` is the tuple of `Arc<P>` parameter handles; it only exists to keep
/// the blanket impls for different arities from overlapping.
pub trait Constructor<Args>: Send + Sync + 'static {
    /// The concrete type this constructor produces
    type Output: Send + Sync + 'static;

    /// Parameter type keys, in declared order
    fn parameters() -> Vec<TypeKey>;

    /// Invoke construction with already-resolved arguments
    ///
    /// `args` must match [`Self::parameters`] in length and order.
    fn construct(&self, args: &[Shared]) -> Result<Self::Output>;
}

macro_rules! impl_constructor {
    ($($idx:tt: $param:ident),*) => {
        impl<Func, Out, $($param),*> Constructor<($(Arc<$param>,)*)> for Func
        where
            Func: Fn($(Arc<$param>),*) -> Out + Send + Sync + 'static,
            Out: Send + Sync + 'static,
            $($param: ?Sized + Send + Sync + 'static,)*
        {
            type Output = Out;

            fn parameters() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$param>()),*]
            }

            #[allow(unused_variables)]
            fn construct(&self, args: &[Shared]) -> Result<Out> {
                Ok((self)($(
                    recover::<$param>(&args[$idx])
                        .ok_or_else(|| Error::type_mismatch(TypeKey::of::<$param>()))?
                ),*))
            }
        }
    };
}

impl_constructor!();
impl_constructor!(0: P0);
impl_constructor!(0: P0, 1: P1);
impl_constructor!(0: P0, 1: P1, 2: P2);
impl_constructor!(0: P0, 1: P1, 2: P2, 3: P3);
impl_constructor!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4);
impl_constructor!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5);
impl_constructor!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6);
impl_constructor!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7);

/// Type-erased constructor entry as stored in the catalog
pub struct ConstructorSpec {
    parameters: Vec<TypeKey>,
    build: Box<dyn Fn(&[Shared]) -> Result<Shared> + Send + Sync>,
}

impl ConstructorSpec {
    /// Erase a typed constructor into a catalog entry
    pub(crate) fn new<Args, F>(constructor: F) -> Self
    where
        F: Constructor<Args>,
    {
        Self {
            parameters: F::parameters(),
            build: Box::new(move |args| {
                let value = constructor.construct(args)?;
                Ok(erase(Arc::new(value)))
            }),
        }
    }

    /// Parameter type keys, in declared order
    pub fn parameters(&self) -> &[TypeKey] {
        &self.parameters
    }

    /// Whether this constructor takes no parameters
    pub fn is_parameterless(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Construct an instance from resolved arguments, in declared order
    pub(crate) fn construct(&self, args: &[Shared]) -> Result<Shared> {
        (self.build)(args)
    }
}

impl std::fmt::Debug for ConstructorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorSpec")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
