//! Compile-time component registry
//!
//! Auto-registration for catalog entries using linkme distributed slices.
//! Components submit an install function at compile time and are collected
//! into a catalog at startup, replacing any need for runtime reflection over
//! loaded code.
//!
//! ## Usage
//!
//! ### Registering a component (in any linked crate)
//!
//! ```ignore
//! use magus::registry::{COMPONENTS, ComponentEntry};
//!
//! #[linkme::distributed_slice(COMPONENTS)]
//! static ENGINE: ComponentEntry = ComponentEntry {
//!     name: "engine",
//!     install: |builder| {
//!         builder
//!             .provide(|| Engine::default())
//!             .bind::<dyn Motor, Engine>(|engine| engine)
//!     },
//! };
//! ```
//!
//! ### Building the catalog from the registry
//!
//! ```ignore
//! let catalog = CatalogBuilder::new().install_registered().build();
//! ```

use tracing::debug;

use crate::catalog::CatalogBuilder;

/// Registry entry for a self-registering component
pub struct ComponentEntry {
    /// Unique component name, used for diagnostics
    pub name: &'static str,
    /// Install function that adds the component's registrations to a builder
    pub install: fn(CatalogBuilder) -> CatalogBuilder,
}

// Auto-collection via linkme distributed slices - components submit entries at compile time
#[linkme::distributed_slice]
pub static COMPONENTS: [ComponentEntry] = [..];

/// Apply every registered install function to the builder, in slice order
pub(crate) fn install_all(builder: CatalogBuilder) -> CatalogBuilder {
    debug!("installing {} registered components", COMPONENTS.len());
    COMPONENTS
        .iter()
        .fold(builder, |builder, entry| (entry.install)(builder))
}

/// List the names of all registered components
///
/// Useful for CLI help and host diagnostics.
pub fn registered_components() -> Vec<&'static str> {
    COMPONENTS.iter().map(|entry| entry.name).collect()
}
