//! Per-request cache policy

/// Whether a resolution request may reuse and populate the instance cache
///
/// The policy applies to the top-level request only: dependencies are always
/// resolved `Cached`, so a `Fresh` object still shares its sub-dependencies
/// with every other instance in the system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// A single instance shared by the entire resolver is returned
    #[default]
    Cached,
    /// A new instance is constructed for this call and not retained
    Fresh,
}
