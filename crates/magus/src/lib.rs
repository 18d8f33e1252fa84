//! magus - minimal auto-wiring dependency-resolution engine
//!
//! Given a requested type, magus produces a fully-constructed instance by
//! recursively satisfying constructor parameters from an explicit type
//! catalog built at startup. There is no runtime reflection: constructors and
//! interface bindings are typed capabilities captured at registration time.
//!
//! ## Architecture
//!
//! ```text
//! CatalogBuilder ──build()──▶ Catalog (read-only metadata oracle)
//!                                 │
//!                                 ▼
//!                             Resolver ──▶ InstanceCache (per-resolver singletons)
//!                                 │
//!                  resolve::<T>() / resolve_with::<T>(policy)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use magus::{CatalogBuilder, Resolver};
//!
//! trait Motor: Send + Sync {
//!     fn start(&self) -> &'static str;
//! }
//!
//! #[derive(Default)]
//! struct Engine;
//!
//! impl Motor for Engine {
//!     fn start(&self) -> &'static str {
//!         "vroom"
//!     }
//! }
//!
//! struct Car {
//!     motor: Arc<dyn Motor>,
//! }
//!
//! let catalog = CatalogBuilder::new()
//!     .provide(Engine::default)
//!     .bind::<dyn Motor, Engine>(|engine| engine)
//!     .provide(|motor: Arc<dyn Motor>| Car { motor })
//!     .build();
//!
//! let resolver = Resolver::new(catalog);
//! let car: Arc<Car> = resolver.resolve()?;
//! assert_eq!(car.motor.start(), "vroom");
//!
//! // Singleton identity: the same Arc comes back every time.
//! let again: Arc<Car> = resolver.resolve()?;
//! assert!(Arc::ptr_eq(&car, &again));
//! # Ok::<(), magus::Error>(())
//! ```

/// Instance cache internals
mod cache;
/// Type catalog and its builder
pub mod catalog;
/// Constructor descriptors and the typed registration trait
pub mod constructor;
/// Shared instance representation
mod instance;
/// Compile-time component registry
pub mod registry;
/// The resolver core
pub mod resolver;

// Re-export the public surface
pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, Classification};
pub use constructor::{Constructor, ConstructorSpec};
pub use magus_domain::{CachePolicy, Error, Result, TypeKey};
pub use registry::{COMPONENTS, ComponentEntry, registered_components};
pub use resolver::Resolver;
