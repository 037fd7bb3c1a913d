use core_types::{GameweekRecord, GameweekSummary};
use rust_decimal::Decimal;
use serde::Deserialize;

/// The response from `GET /entry/{id}/history/`.
///
/// The endpoint also returns `past` and `chips` arrays, but the per-week
/// statistics all live in `current`, so that is the only field we keep.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryHistoryResponse {
    pub current: Vec<EntryHistoryRow>,
}

/// One finished gameweek from an entry's history.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryHistoryRow {
    /// Gameweek number, 1-based.
    pub event: u32,
    /// Points scored this gameweek. Can go negative after transfer hits.
    pub points: i32,
    /// Running season total after this gameweek.
    pub total_points: i32,
    /// Overall rank across the whole game after this gameweek.
    pub rank: u64,
    /// Transfers made ahead of this gameweek.
    pub event_transfers: u32,
}

impl From<EntryHistoryRow> for GameweekRecord {
    fn from(row: EntryHistoryRow) -> Self {
        GameweekRecord {
            gameweek: row.event,
            total_points: row.total_points,
            points: row.points,
            rank: row.rank,
            transfers: row.event_transfers,
        }
    }
}

/// The response from `GET /bootstrap-static/`, reduced to the `events` list.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapResponse {
    pub events: Vec<EventRow>,
}

/// Game-wide data for one gameweek.
///
/// `average_entry_score` and `ranked_count` stay zero for gameweeks that have
/// not been played yet; the aggregation truncates those away.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    pub id: u32,
    pub average_entry_score: Decimal,
    pub ranked_count: u64,
}

impl From<EventRow> for GameweekSummary {
    fn from(row: EventRow) -> Self {
        GameweekSummary {
            gameweek: row.id,
            average_score: row.average_entry_score,
            ranked_count: row.ranked_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_history_deserializes() {
        let json = r#"{
            "current": [
                {
                    "event": 1,
                    "points": 57,
                    "total_points": 57,
                    "rank": 1901198,
                    "event_transfers": 0,
                    "event_transfers_cost": 0,
                    "points_on_bench": 8
                }
            ],
            "past": [],
            "chips": []
        }"#;

        let response: EntryHistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.current.len(), 1);

        let record = GameweekRecord::from(response.current[0].clone());
        assert_eq!(record.gameweek, 1);
        assert_eq!(record.points, 57);
        assert_eq!(record.total_points, 57);
        assert_eq!(record.rank, 1901198);
        assert_eq!(record.transfers, 0);
    }

    #[test]
    fn test_entry_history_allows_negative_points() {
        let json = r#"{
            "current": [
                {"event": 9, "points": -4, "total_points": 412, "rank": 88, "event_transfers": 3}
            ]
        }"#;

        let response: EntryHistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.current[0].points, -4);
        assert_eq!(response.current[0].event_transfers, 3);
    }

    #[test]
    fn test_bootstrap_deserializes() {
        let json = r#"{
            "events": [
                {
                    "id": 1,
                    "name": "Gameweek 1",
                    "average_entry_score": 54,
                    "ranked_count": 9234567,
                    "finished": true
                },
                {
                    "id": 2,
                    "name": "Gameweek 2",
                    "average_entry_score": 0,
                    "ranked_count": 0,
                    "finished": false
                }
            ]
        }"#;

        let response: BootstrapResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.events.len(), 2);

        let summary = GameweekSummary::from(response.events[0].clone());
        assert_eq!(summary.gameweek, 1);
        assert_eq!(summary.average_score, dec!(54));
        assert_eq!(summary.ranked_count, 9234567);
    }
}
