//! OpenDota API surface: client, endpoint methods, filters and records.

pub mod client;
mod endpoints;
pub mod filters;
pub mod types;

pub use client::OpenDota;
pub use filters::{PlayerMatchesFilter, PublicMatchesFilter};
