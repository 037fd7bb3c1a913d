use core_types::WeekTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entrant's season trajectory measured against the game-wide average.
///
/// Each point is `(gameweek, cumulative score minus cumulative average)`, so a
/// positive value means the entrant is ahead of an average manager's season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeSeries {
    pub entrant: String,
    pub points: Vec<(u32, Decimal)>,
}

/// One row of the league standings at the latest gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based rank; tied entrants share a rank.
    pub rank: u32,
    pub entrant: String,
    pub total_points: i32,
    pub leader: bool,
}

/// A single-week score worth calling out (best or worst in the league).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHighlight {
    pub entrant: String,
    pub gameweek: u32,
    pub points: i32,
}

/// A single-week overall-rank percentile worth calling out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileHighlight {
    pub entrant: String,
    pub gameweek: u32,
    /// Fraction of the whole game ranked at or above the entrant, in percent.
    /// Lower is better.
    pub percentile: Decimal,
}

/// The longest run of consecutive above-average (or below-average) gameweeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakHighlight {
    pub entrant: String,
    pub length: u32,
}

/// Season transfer total for one entrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTotal {
    pub entrant: String,
    pub transfers: u32,
}

/// How many gameweeks an entrant finished above the game-wide average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboveAverageCount {
    pub entrant: String,
    pub gameweeks: u32,
}

/// The complete set of derived league statistics.
///
/// This struct is the final output of the `AnalyticsEngine` and serves as the
/// data transfer object for results throughout the entire system. Highlights
/// are `Option<_>` so an empty table set still yields a well-formed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueReport {
    // I. Season Trajectory
    pub relative_performance: Vec<RelativeSeries>,

    // II. The Race
    pub standings: Vec<Standing>,

    // III. Single-Week Highlights
    pub best_week: Option<ScoreHighlight>,
    pub worst_week: Option<ScoreHighlight>,

    // IV. Overall-Rank Percentiles
    pub percentiles: WeekTable<Decimal>,
    pub best_percentile: Option<PercentileHighlight>,
    pub worst_percentile: Option<PercentileHighlight>,

    // V. Consistency
    pub above_average: WeekTable<bool>,
    pub longest_above_average_streak: Option<StreakHighlight>,
    pub longest_below_average_streak: Option<StreakHighlight>,

    // VI. Activity Totals
    pub transfer_totals: Vec<TransferTotal>,
    pub above_average_counts: Vec<AboveAverageCount>,
}

impl LeagueReport {
    /// Creates a new, empty LeagueReport.
    /// This is useful as a default or starting point before calculations.
    pub fn new() -> Self {
        Self {
            relative_performance: Vec::new(),
            standings: Vec::new(),
            best_week: None,
            worst_week: None,
            percentiles: WeekTable::default(),
            best_percentile: None,
            worst_percentile: None,
            above_average: WeekTable::default(),
            longest_above_average_streak: None,
            longest_below_average_streak: None,
            transfer_totals: Vec::new(),
            above_average_counts: Vec::new(),
        }
    }
}

impl Default for LeagueReport {
    fn default() -> Self {
        Self::new()
    }
}
