//! Transport-side building blocks for the OpenDota client
//!
//! - `query`: query-string construction that drops absent values
//! - `pacing`: minimum delay between unauthenticated calls
//! - `cache`: raw-response recording under the data directory

pub mod cache;
pub mod pacing;
pub mod query;

pub use cache::{try_read_to_string, write_string, RequestKey, ResponseCache};
pub use pacing::{PaceGuard, Pacer};
pub use query::QueryParams;
