use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One FPL entry (team) tracked by the mini-league.
///
/// The roster of entrants is configuration, not a constant: it is loaded from
/// `config.toml` and handed to the aggregator at construction time. The
/// display name doubles as the column key in every derived table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    /// The FPL entry id, visible in the team's URL on the official site.
    pub id: u64,
    /// Display name, used as the column key in every table.
    pub name: String,
}

/// One entrant's result for a single gameweek, as served by the FPL
/// `entry/{id}/history/` endpoint. Immutable once fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameweekRecord {
    /// The gameweek number (1-based).
    pub gameweek: u32,
    /// Running total score through this gameweek.
    pub total_points: i32,
    /// Points earned in this gameweek alone. Can go negative on transfer-cost
    /// hits, so this is signed.
    pub points: i32,
    /// Rank among all ranked FPL entries for this gameweek (1 = best).
    pub rank: u64,
    /// Transfers made during this gameweek.
    pub transfers: u32,
}

/// League-wide context for a single gameweek, from the FPL
/// `bootstrap-static` endpoint. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameweekSummary {
    /// The gameweek number (1-based).
    pub gameweek: u32,
    /// Mean score across all ranked entries for this gameweek.
    pub average_score: Decimal,
    /// Number of entries ranked this gameweek; the percentile denominator.
    pub ranked_count: u64,
}
