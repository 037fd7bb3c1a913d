use crate::structs::GameweekSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single entrant's week-indexed column of values.
///
/// Cells are keyed by gameweek; weeks are unique per entrant and iterate in
/// ascending order regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSeries<T> {
    /// The entrant display name this column belongs to.
    pub entrant: String,
    cells: BTreeMap<u32, T>,
}

impl<T: Copy> WeekSeries<T> {
    pub fn new(entrant: impl Into<String>) -> Self {
        Self {
            entrant: entrant.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Sets the value for a gameweek. Weeks are unique per entrant, so a
    /// repeated week replaces the earlier value.
    pub fn insert(&mut self, gameweek: u32, value: T) {
        self.cells.insert(gameweek, value);
    }

    pub fn get(&self, gameweek: u32) -> Option<T> {
        self.cells.get(&gameweek).copied()
    }

    /// Iterates `(gameweek, value)` pairs in ascending week order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, T)> + '_ {
        self.cells.iter().map(|(&week, &value)| (week, value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A set of aligned per-entrant columns sharing one week index.
///
/// The index is the ascending union of every column's observed gameweeks.
/// Missing (entrant, week) cells stay unset; zero-filling happens at the
/// point of cross-table arithmetic, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTable<T> {
    index: Vec<u32>,
    columns: Vec<WeekSeries<T>>,
}

impl<T: Copy> WeekTable<T> {
    /// Builds a table from columns, deriving the shared week index as the
    /// sorted union of all observed weeks. Column order is preserved; it is
    /// the tie-break order for every downstream statistic.
    pub fn from_columns(columns: Vec<WeekSeries<T>>) -> Self {
        let mut index: Vec<u32> = columns
            .iter()
            .flat_map(|column| column.cells.keys().copied())
            .collect();
        index.sort_unstable();
        index.dedup();
        Self { index, columns }
    }

    /// The shared ascending week index.
    pub fn index(&self) -> &[u32] {
        &self.index
    }

    pub fn columns(&self) -> &[WeekSeries<T>] {
        &self.columns
    }

    pub fn column(&self, entrant: &str) -> Option<&WeekSeries<T>> {
        self.columns.iter().find(|column| column.entrant == entrant)
    }

    pub fn get(&self, entrant: &str, gameweek: u32) -> Option<T> {
        self.column(entrant).and_then(|column| column.get(gameweek))
    }

    /// The most recent gameweek present in the index, if any.
    pub fn last_gameweek(&self) -> Option<u32> {
        self.index.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<T> Default for WeekTable<T> {
    fn default() -> Self {
        Self {
            index: Vec::new(),
            columns: Vec::new(),
        }
    }
}

/// The aggregation product: the four aligned tables plus the truncated
/// league summary table. Everything downstream analytics needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueTables {
    /// Running total score per entrant per gameweek.
    pub cumulative: WeekTable<i32>,
    /// Single-gameweek score per entrant.
    pub weekly: WeekTable<i32>,
    /// Rank among all FPL entries per entrant per gameweek.
    pub ranks: WeekTable<u64>,
    /// Transfers made per entrant per gameweek.
    pub transfers: WeekTable<u32>,
    /// League-wide summaries, ascending by gameweek, truncated to the weekly
    /// table's final gameweek.
    pub summaries: Vec<GameweekSummary>,
}

impl LeagueTables {
    /// Looks up the league summary for a gameweek.
    pub fn summary(&self, gameweek: u32) -> Option<&GameweekSummary> {
        self.summaries
            .binary_search_by_key(&gameweek, |summary| summary.gameweek)
            .ok()
            .map(|position| &self.summaries[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn series(entrant: &str, cells: &[(u32, i32)]) -> WeekSeries<i32> {
        let mut column = WeekSeries::new(entrant);
        for &(week, value) in cells {
            column.insert(week, value);
        }
        column
    }

    #[test]
    fn test_index_is_sorted_union_of_columns() {
        let table = WeekTable::from_columns(vec![
            series("A", &[(3, 30), (1, 10)]),
            series("B", &[(2, 20), (3, 31)]),
        ]);

        assert_eq!(table.index(), &[1, 2, 3]);
        assert_eq!(table.last_gameweek(), Some(3));
    }

    #[test]
    fn test_missing_cells_stay_unset() {
        let table = WeekTable::from_columns(vec![
            series("A", &[(1, 10), (3, 30)]),
            series("B", &[(2, 20)]),
        ]);

        assert_eq!(table.get("A", 1), Some(10));
        assert_eq!(table.get("A", 2), None);
        assert_eq!(table.get("B", 2), Some(20));
        assert_eq!(table.get("C", 1), None);
    }

    #[test]
    fn test_column_order_is_preserved() {
        let table = WeekTable::from_columns(vec![
            series("Zoe", &[(1, 1)]),
            series("Abe", &[(1, 2)]),
        ]);

        let names: Vec<&str> = table
            .columns()
            .iter()
            .map(|column| column.entrant.as_str())
            .collect();
        assert_eq!(names, vec!["Zoe", "Abe"]);
    }

    #[test]
    fn test_repeated_week_replaces_value() {
        let mut column = WeekSeries::new("A");
        column.insert(1, 5);
        column.insert(1, 7);

        assert_eq!(column.len(), 1);
        assert_eq!(column.get(1), Some(7));
    }

    #[test]
    fn test_summary_lookup() {
        let tables = LeagueTables {
            cumulative: WeekTable::default(),
            weekly: WeekTable::default(),
            ranks: WeekTable::default(),
            transfers: WeekTable::default(),
            summaries: vec![
                GameweekSummary {
                    gameweek: 1,
                    average_score: Decimal::from(50),
                    ranked_count: 100,
                },
                GameweekSummary {
                    gameweek: 2,
                    average_score: Decimal::from(60),
                    ranked_count: 110,
                },
            ],
        };

        assert_eq!(tables.summary(2).map(|s| s.ranked_count), Some(110));
        assert!(tables.summary(3).is_none());
    }
}
