//! OpenDota API Client Library
//!
//! Typed access to the public OpenDota REST API: matches, players and heroes.
//!
//! ## Features
//!
//! - **Typed or raw output**: validated records, or the decoded JSON untouched
//! - **Authentication**: API key as a bearer header or an `api_key` query parameter
//! - **Pacing**: unauthenticated clients space their calls out to respect the public quota
//! - **Response recording**: optionally keep every raw body under a data directory
//! - **Error taxonomy**: not-found, rate-limited, generic API and data-shape errors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use opendota::{ClientConfig, OpenDota, PlayerMatchesFilter};
//!
//! # async fn example() -> opendota::Result<()> {
//! let client = OpenDota::new(ClientConfig::from_env())?;
//!
//! let recent = client
//!     .get_player_matches(86745912u64, &PlayerMatchesFilter::default().limit(5))
//!     .await?
//!     .into_typed()?;
//!
//! for m in recent {
//!     println!("{} won={:?}", m.match_id, m.won());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Provide an API key to lift the public rate limit:
//! ```bash
//! export OPENDOTA_API_KEY=your-key
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod fantasy;
pub mod ids;
pub mod opendota;
pub mod response;

// Re-export commonly used types
pub use config::{AuthMethod, ClientConfig, OutputFormat};
pub use error::{OpenDotaError, Result};
pub use fantasy::{FantasyWeights, FANTASY};
pub use ids::{AccountId, HeroId, MatchId};
pub use opendota::{OpenDota, PlayerMatchesFilter, PublicMatchesFilter};
pub use response::Payload;

pub const API_KEY_ENV_VAR: &str = "OPENDOTA_API_KEY";
