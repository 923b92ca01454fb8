//! rosterbot - fantasy roster lineup keeper
//!
//! Inspects a fantasy-sports roster, finds bench slots whose starter is
//! inactive for the day, and proposes lineup changes that activate an
//! eligible substitute.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`auth`] - Bearer token acquisition (static token, client credentials)
//! - [`client`] - Roster fetch and update transport
//! - [`roster`] - Roster document parsing into [`models::RosterState`]
//! - [`planner`] - Substitution planning and matching strategies
//! - [`encoder`] - Update document encoding
//! - [`runner`] - Single-run orchestration
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities, domain errors and retry policy
//!
//! # Example
//!
//! ```no_run
//! use rosterbot::config::Config;
//! use rosterbot::runner::RosterRunner;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let runner = RosterRunner::from_config(&config)?;
//!     let report = runner.run_once(rosterbot::utils::today_local()).await?;
//!     println!("{} directives", report.directives.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod models;
pub mod planner;
pub mod roster;
pub mod runner;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::auth::{AuthStrategy, Authenticator};
    pub use crate::client::{RosterApi, YahooRosterClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, RosterErrorTrait};
    pub use crate::models::{Player, RosterState, RunReport, SubstitutionDirective};
    pub use crate::planner::{MatchingMode, MatchingStrategy, SubstitutionPlanner};
    pub use crate::runner::RosterRunner;
}

// Direct re-exports for convenience
pub use models::{Player, RosterState, SubstitutionDirective};
