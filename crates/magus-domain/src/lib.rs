//! Domain layer for the magus dependency-resolution engine
//!
//! Pure value objects shared by the engine and its hosts. No I/O, no
//! concurrency primitives, no construction logic.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeKey`] | Identity of a requested type, independent of its runtime layout |
//! | [`CachePolicy`] | Per-request choice between singleton reuse and fresh construction |
//! | [`Error`] | Resolution failure taxonomy |

/// Resolution error taxonomy
pub mod error;
/// Type identity value object
pub mod key;
/// Per-request cache policy
pub mod policy;

// Re-export commonly used domain types
pub use error::{Error, Result};
pub use key::TypeKey;
pub use policy::CachePolicy;
