//! Error handling types
//!
//! Every resolution failure aborts the entire top-level request; there are no
//! partial successes. Errors propagate synchronously to the original caller
//! as the proximate cause, never wrapped per recursion level, so a failure
//! deep in a dependency chain names the type that ultimately could not be
//! satisfied.

use thiserror::Error;

use crate::key::TypeKey;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Resolution failure taxonomy
#[derive(Error, Debug)]
pub enum Error {
    /// Concrete type has no usable constructor
    #[error("no accessible constructor registered for type {type_name}")]
    NoAccessibleConstructor {
        /// The type that cannot be constructed
        type_name: &'static str,
    },

    /// Every constructor of a concrete type has at least one unresolvable parameter
    #[error("dependencies of type {type_name} cannot be satisfied")]
    UnsatisfiableDependencies {
        /// The type whose constructors were all rejected
        type_name: &'static str,
    },

    /// Abstract type has no binding the catalog can resolve
    #[error("no implementation found for abstract type {type_name}")]
    NoImplementationFound {
        /// The abstract type that was requested
        type_name: &'static str,
    },

    /// The requested type is already being resolved on this call chain
    #[error("cyclic dependency detected while resolving {type_name}: {chain}")]
    CyclicDependency {
        /// The type that closed the cycle
        type_name: &'static str,
        /// The in-flight resolution chain, outermost request first
        chain: String,
    },

    /// The requested type was never registered in the catalog
    #[error("type {type_name} is not registered in the catalog")]
    UnknownType {
        /// The unregistered type
        type_name: &'static str,
    },

    /// A stored instance did not match the requested handle type
    ///
    /// Indicates a broken registration invariant rather than a recoverable
    /// condition; surfaced as an error instead of a panic so hosts can report
    /// it alongside the other kinds.
    #[error("instance for type {type_name} does not match the requested handle type")]
    TypeMismatch {
        /// The type whose payload failed to downcast
        type_name: &'static str,
    },
}

impl Error {
    /// `NoAccessibleConstructor` for the given key
    pub fn no_accessible_constructor(key: TypeKey) -> Self {
        Self::NoAccessibleConstructor {
            type_name: key.name(),
        }
    }

    /// `UnsatisfiableDependencies` for the given key
    pub fn unsatisfiable_dependencies(key: TypeKey) -> Self {
        Self::UnsatisfiableDependencies {
            type_name: key.name(),
        }
    }

    /// `NoImplementationFound` for the given key
    pub fn no_implementation_found(key: TypeKey) -> Self {
        Self::NoImplementationFound {
            type_name: key.name(),
        }
    }

    /// `CyclicDependency` for the given key, with the in-flight chain
    pub fn cyclic_dependency(key: TypeKey, chain: impl Into<String>) -> Self {
        Self::CyclicDependency {
            type_name: key.name(),
            chain: chain.into(),
        }
    }

    /// `UnknownType` for the given key
    pub fn unknown_type(key: TypeKey) -> Self {
        Self::UnknownType {
            type_name: key.name(),
        }
    }

    /// `TypeMismatch` for the given key
    pub fn type_mismatch(key: TypeKey) -> Self {
        Self::TypeMismatch {
            type_name: key.name(),
        }
    }

    /// Name of the type this error is about
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::NoAccessibleConstructor { type_name }
            | Self::UnsatisfiableDependencies { type_name }
            | Self::NoImplementationFound { type_name }
            | Self::CyclicDependency { type_name, .. }
            | Self::UnknownType { type_name }
            | Self::TypeMismatch { type_name } => type_name,
        }
    }
}
