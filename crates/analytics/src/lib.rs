//! # Gaffer Analytics Engine
//!
//! This crate derives the comparative league statistics from the aggregated
//! gameweek tables: the race standings, single-week highlights, percentile
//! extremes, streaks and activity totals.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of external systems. It
//!   depends only on `core-types`.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes the aligned tables as input and produces a
//!   `LeagueReport` as output. This makes it highly reliable and easy to test.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `LeagueReport`: The standardized struct that holds all derived statistics.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    AboveAverageCount, LeagueReport, PercentileHighlight, RelativeSeries, ScoreHighlight,
    Standing, StreakHighlight, TransferTotal,
};
