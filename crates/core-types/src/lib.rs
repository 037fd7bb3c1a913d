pub mod structs;
pub mod tables;

// Re-export the core types to provide a clean public API.
pub use structs::{Entrant, GameweekRecord, GameweekSummary};
pub use tables::{LeagueTables, WeekSeries, WeekTable};
