//! # Aggregator Crate
//!
//! Turns raw per-entrant FPL histories into the week-indexed league tables
//! the analytics run on. One table per statistic (cumulative points, weekly
//! points, overall rank, transfers), all sharing the same sorted gameweek
//! index and the same roster column order.

use core_types::{Entrant, GameweekRecord, GameweekSummary, LeagueTables, WeekSeries, WeekTable};
use std::collections::HashMap;

pub mod error;

pub use error::AggregatorError;

/// Builds [`LeagueTables`] from fetched histories, keyed by the configured
/// roster.
///
/// The roster is fixed at construction; its order becomes the column order of
/// every produced table.
pub struct Aggregator {
    roster: Vec<Entrant>,
}

impl Aggregator {
    pub fn new(roster: Vec<Entrant>) -> Self {
        Self { roster }
    }

    /// Pivots the per-entrant histories into the four statistic tables and
    /// pairs them with the game-wide summaries.
    ///
    /// Summaries for gameweeks beyond the roster's latest recorded week are
    /// dropped; the FPL bootstrap data lists the whole season up front, with
    /// zeroed averages for weeks not yet played.
    pub fn aggregate(
        &self,
        histories: &HashMap<u64, Vec<GameweekRecord>>,
        summaries: &[GameweekSummary],
    ) -> Result<LeagueTables, AggregatorError> {
        if self.roster.is_empty() {
            return Err(AggregatorError::EmptyRoster);
        }

        let mut cumulative_columns = Vec::with_capacity(self.roster.len());
        let mut weekly_columns = Vec::with_capacity(self.roster.len());
        let mut rank_columns = Vec::with_capacity(self.roster.len());
        let mut transfer_columns = Vec::with_capacity(self.roster.len());

        for entrant in &self.roster {
            let records = histories
                .get(&entrant.id)
                .filter(|records| !records.is_empty())
                .ok_or_else(|| AggregatorError::EmptyHistory(entrant.name.clone()))?;

            let mut cumulative = WeekSeries::new(&entrant.name);
            let mut weekly = WeekSeries::new(&entrant.name);
            let mut ranks = WeekSeries::new(&entrant.name);
            let mut transfers = WeekSeries::new(&entrant.name);

            for record in records {
                cumulative.insert(record.gameweek, record.total_points);
                weekly.insert(record.gameweek, record.points);
                ranks.insert(record.gameweek, record.rank);
                transfers.insert(record.gameweek, record.transfers);
            }

            cumulative_columns.push(cumulative);
            weekly_columns.push(weekly);
            rank_columns.push(ranks);
            transfer_columns.push(transfers);
        }

        let cumulative = WeekTable::from_columns(cumulative_columns);
        let weekly = WeekTable::from_columns(weekly_columns);
        let ranks = WeekTable::from_columns(rank_columns);
        let transfers = WeekTable::from_columns(transfer_columns);

        let last_played = weekly.last_gameweek().unwrap_or(0);
        let mut kept: Vec<GameweekSummary> = summaries
            .iter()
            .filter(|summary| summary.gameweek <= last_played)
            .cloned()
            .collect();
        kept.sort_by_key(|summary| summary.gameweek);

        let dropped = summaries.len() - kept.len();
        if dropped > 0 {
            tracing::debug!(dropped, last_played, "Dropped unplayed gameweek summaries");
        }

        Ok(LeagueTables {
            cumulative,
            weekly,
            ranks,
            transfers,
            summaries: kept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn entrant(id: u64, name: &str) -> Entrant {
        Entrant {
            id,
            name: name.to_string(),
        }
    }

    fn record(gameweek: u32, total_points: i32, points: i32) -> GameweekRecord {
        GameweekRecord {
            gameweek,
            total_points,
            points,
            rank: 1000 * gameweek as u64,
            transfers: 1,
        }
    }

    fn summary(gameweek: u32, average: i64) -> GameweekSummary {
        GameweekSummary {
            gameweek,
            average_score: Decimal::from(average),
            ranked_count: 9_000_000,
        }
    }

    #[test]
    fn test_tables_share_index_and_roster_order() {
        let aggregator = Aggregator::new(vec![entrant(1, "Sam"), entrant(2, "Pierre")]);
        let mut histories = HashMap::new();
        histories.insert(1, vec![record(1, 50, 50), record(3, 130, 45)]);
        histories.insert(2, vec![record(1, 60, 60), record(2, 100, 40)]);

        let tables = aggregator.aggregate(&histories, &[]).unwrap();

        // Union of both entrants' weeks, sorted.
        assert_eq!(tables.cumulative.index(), &[1, 2, 3]);
        assert_eq!(tables.weekly.index(), &[1, 2, 3]);
        assert_eq!(tables.ranks.index(), &[1, 2, 3]);
        assert_eq!(tables.transfers.index(), &[1, 2, 3]);

        let names: Vec<&str> = tables
            .cumulative
            .columns()
            .iter()
            .map(|column| column.entrant.as_str())
            .collect();
        assert_eq!(names, vec!["Sam", "Pierre"]);
    }

    #[test]
    fn test_cells_land_in_the_right_table() {
        let aggregator = Aggregator::new(vec![entrant(1, "Sam")]);
        let mut histories = HashMap::new();
        histories.insert(
            1,
            vec![GameweekRecord {
                gameweek: 4,
                total_points: 210,
                points: -4,
                rank: 123_456,
                transfers: 3,
            }],
        );

        let tables = aggregator.aggregate(&histories, &[]).unwrap();

        assert_eq!(tables.cumulative.get("Sam", 4), Some(210));
        assert_eq!(tables.weekly.get("Sam", 4), Some(-4));
        assert_eq!(tables.ranks.get("Sam", 4), Some(123_456));
        assert_eq!(tables.transfers.get("Sam", 4), Some(3));
        assert_eq!(tables.weekly.get("Sam", 5), None);
    }

    #[test]
    fn test_summaries_truncate_to_played_weeks() {
        let aggregator = Aggregator::new(vec![entrant(1, "Sam")]);
        let mut histories = HashMap::new();
        histories.insert(1, vec![record(1, 50, 50), record(2, 90, 40)]);

        // Bootstrap data lists the full season; only played weeks survive.
        let summaries = vec![summary(3, 0), summary(1, 54), summary(2, 61), summary(4, 0)];
        let tables = aggregator.aggregate(&histories, &summaries).unwrap();

        let weeks: Vec<u32> = tables.summaries.iter().map(|s| s.gameweek).collect();
        assert_eq!(weeks, vec![1, 2]);
        assert_eq!(tables.summary(1).unwrap().average_score, Decimal::from(54));
    }

    #[test]
    fn test_empty_roster_is_rejected() {
        let aggregator = Aggregator::new(Vec::new());
        let result = aggregator.aggregate(&HashMap::new(), &[]);
        assert_eq!(result.unwrap_err(), AggregatorError::EmptyRoster);
    }

    #[test]
    fn test_missing_history_is_rejected() {
        let aggregator = Aggregator::new(vec![entrant(1, "Sam"), entrant(2, "Pierre")]);
        let mut histories = HashMap::new();
        histories.insert(1, vec![record(1, 50, 50)]);

        let result = aggregator.aggregate(&histories, &[]);
        assert_eq!(
            result.unwrap_err(),
            AggregatorError::EmptyHistory("Pierre".to_string())
        );
    }

    #[test]
    fn test_history_without_gameweeks_is_rejected() {
        let aggregator = Aggregator::new(vec![entrant(1, "Sam")]);
        let mut histories = HashMap::new();
        histories.insert(1, Vec::new());

        let result = aggregator.aggregate(&histories, &[]);
        assert_eq!(
            result.unwrap_err(),
            AggregatorError::EmptyHistory("Sam".to_string())
        );
    }
}
