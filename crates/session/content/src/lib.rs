//! Built-in compendium data for `session-core`.
//!
//! Ships the baseline standard and tech action definitions as embedded RON
//! data files and loads them into an [`session_core::ActionRegistry`].
//! Hosts can extend the registry with frame- or gear-specific actions on
//! top of this baseline.

#[cfg(feature = "loaders")]
pub mod compendium;

#[cfg(feature = "loaders")]
pub use compendium::Compendium;
