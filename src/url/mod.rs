//! URL handling module for Linkscout
//!
//! Provides URL normalization (the identity form used for frontier
//! deduplication) and host extraction for the same-host filter.

mod host;
mod normalize;

pub use host::host_of;
pub use normalize::normalize_url;
