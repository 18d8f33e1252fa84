//! Type identity value object
//!
//! [`TypeKey`] is the descriptor under which types are registered, requested,
//! and cached. Two keys are equal iff they denote the same Rust type; the
//! human-readable name rides along for diagnostics only and never takes part
//! in equality or hashing.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a requested type
///
/// Works for sized types and for `dyn Trait` object types alike, so abstract
/// service interfaces get their own keys, distinct from any implementation's
/// key.
///
/// # Example
///
/// ```
/// use magus_domain::TypeKey;
///
/// trait Greeter {}
/// struct English;
///
/// assert_ne!(TypeKey::of::<dyn Greeter>(), TypeKey::of::<English>());
/// assert_eq!(TypeKey::of::<English>(), TypeKey::of::<English>());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Create the key for type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Display name of the denoted type
    ///
    /// Intended for error messages and logging. The exact rendering follows
    /// `std::any::type_name` and is not stable across compiler versions.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
