use crate::error::AnalyticsError;
use crate::report::{
    AboveAverageCount, LeagueReport, PercentileHighlight, RelativeSeries, ScoreHighlight,
    Standing, StreakHighlight, TransferTotal,
};
use core_types::{LeagueTables, WeekSeries, WeekTable};
use rust_decimal::Decimal;
use std::cmp::Reverse;

/// A stateless calculator for deriving league statistics from the aligned
/// gameweek tables.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating a full league report.
    ///
    /// # Arguments
    ///
    /// * `tables` - The aligned per-statistic tables produced by the aggregator.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `LeagueReport` or an `AnalyticsError`.
    pub fn calculate(&self, tables: &LeagueTables) -> Result<LeagueReport, AnalyticsError> {
        let mut report = LeagueReport::new();

        if tables.cumulative.is_empty() {
            // With no recorded gameweeks every statistic is empty or
            // undefined. Return the default report, which is mostly empty.
            return Ok(report);
        }

        self.calculate_relative_performance(tables, &mut report)?;
        self.calculate_standings(tables, &mut report)?;
        self.calculate_weekly_extremes(tables, &mut report)?;
        self.calculate_percentiles(tables, &mut report)?;
        self.calculate_consistency(tables, &mut report)?;
        self.calculate_activity_totals(tables, &mut report)?;

        Ok(report)
    }

    /// Calculates each entrant's cumulative score relative to the cumulative
    /// game-wide average, week by week.
    fn calculate_relative_performance(
        &self,
        tables: &LeagueTables,
        report: &mut LeagueReport,
    ) -> Result<(), AnalyticsError> {
        let index = tables.cumulative.index();

        // Running sum of the game-wide weekly average, aligned with the index.
        let mut running = Decimal::ZERO;
        let mut average_to_date = Vec::with_capacity(index.len());
        let mut summaries = tables.summaries.iter().peekable();
        for &week in index {
            while let Some(summary) = summaries.peek() {
                if summary.gameweek > week {
                    break;
                }
                running += summary.average_score;
                summaries.next();
            }
            average_to_date.push(running);
        }

        for column in tables.cumulative.columns() {
            let points = index
                .iter()
                .zip(&average_to_date)
                .map(|(&week, average)| {
                    // Missing cells count as zero at the point of arithmetic.
                    let total = Decimal::from(column.get(week).unwrap_or(0));
                    (week, total - *average)
                })
                .collect();

            report.relative_performance.push(RelativeSeries {
                entrant: column.entrant.clone(),
                points,
            });
        }

        Ok(())
    }

    /// Calculates the race standings at the latest recorded gameweek.
    fn calculate_standings(
        &self,
        tables: &LeagueTables,
        report: &mut LeagueReport,
    ) -> Result<(), AnalyticsError> {
        let Some(latest) = tables.cumulative.last_gameweek() else {
            return Ok(());
        };

        let totals: Vec<(String, i32)> = tables
            .cumulative
            .columns()
            .iter()
            .map(|column| (column.entrant.clone(), column.get(latest).unwrap_or(0)))
            .collect();

        let mut standings: Vec<Standing> = totals
            .iter()
            .map(|(entrant, total)| {
                // Tied entrants share a rank: 1 + the number strictly ahead.
                let rank = 1 + totals.iter().filter(|(_, other)| other > total).count() as u32;
                Standing {
                    rank,
                    entrant: entrant.clone(),
                    total_points: *total,
                    leader: rank == 1,
                }
            })
            .collect();

        // Stable sort keeps roster order within a shared rank.
        standings.sort_by_key(|standing| standing.rank);

        report.standings = standings;
        Ok(())
    }

    /// Calculates the single best and single worst weekly hauls in the league.
    fn calculate_weekly_extremes(
        &self,
        tables: &LeagueTables,
        report: &mut LeagueReport,
    ) -> Result<(), AnalyticsError> {
        let mut best: Option<ScoreHighlight> = None;
        let mut worst: Option<ScoreHighlight> = None;

        // Column-major scan with strict comparisons: ties resolve to the
        // earliest roster column, then the earliest week within it.
        for column in tables.weekly.columns() {
            for (gameweek, points) in column.iter() {
                if best.as_ref().map_or(true, |current| points > current.points) {
                    best = Some(ScoreHighlight {
                        entrant: column.entrant.clone(),
                        gameweek,
                        points,
                    });
                }
                if worst.as_ref().map_or(true, |current| points < current.points) {
                    worst = Some(ScoreHighlight {
                        entrant: column.entrant.clone(),
                        gameweek,
                        points,
                    });
                }
            }
        }

        report.best_week = best;
        report.worst_week = worst;
        Ok(())
    }

    /// Calculates the overall-rank percentile table and its extremes.
    ///
    /// A cell is the entrant's overall rank divided by that same week's
    /// ranked player count, in percent. Lower is better; the worst
    /// percentile is reported as the raw maximum.
    fn calculate_percentiles(
        &self,
        tables: &LeagueTables,
        report: &mut LeagueReport,
    ) -> Result<(), AnalyticsError> {
        let hundred = Decimal::from(100);
        let mut columns = Vec::with_capacity(tables.ranks.columns().len());

        for column in tables.ranks.columns() {
            let mut percentiles = WeekSeries::new(&column.entrant);
            for (gameweek, rank) in column.iter() {
                let Some(summary) = tables.summary(gameweek) else {
                    continue;
                };
                if summary.ranked_count == 0 {
                    return Err(AnalyticsError::DivisionByZero(
                        "percentile_rank".to_string(),
                    ));
                }
                let percentile =
                    Decimal::from(rank) / Decimal::from(summary.ranked_count) * hundred;
                percentiles.insert(gameweek, percentile);
            }
            columns.push(percentiles);
        }

        let table = WeekTable::from_columns(columns);

        let mut best: Option<PercentileHighlight> = None;
        let mut worst: Option<PercentileHighlight> = None;
        for column in table.columns() {
            for (gameweek, percentile) in column.iter() {
                if best
                    .as_ref()
                    .map_or(true, |current| percentile < current.percentile)
                {
                    best = Some(PercentileHighlight {
                        entrant: column.entrant.clone(),
                        gameweek,
                        percentile,
                    });
                }
                if worst
                    .as_ref()
                    .map_or(true, |current| percentile > current.percentile)
                {
                    worst = Some(PercentileHighlight {
                        entrant: column.entrant.clone(),
                        gameweek,
                        percentile,
                    });
                }
            }
        }

        report.percentiles = table;
        report.best_percentile = best;
        report.worst_percentile = worst;
        Ok(())
    }

    /// Calculates the above-average table and the longest hot and cold runs.
    fn calculate_consistency(
        &self,
        tables: &LeagueTables,
        report: &mut LeagueReport,
    ) -> Result<(), AnalyticsError> {
        let index = tables.weekly.index();
        let mut columns = Vec::with_capacity(tables.weekly.columns().len());

        for column in tables.weekly.columns() {
            let mut flags = WeekSeries::new(&column.entrant);
            for &gameweek in index {
                // A skipped week counts as zero points, landing below any
                // non-negative average.
                let points = Decimal::from(column.get(gameweek).unwrap_or(0));
                let average = tables
                    .summary(gameweek)
                    .map(|summary| summary.average_score)
                    .unwrap_or(Decimal::ZERO);
                flags.insert(gameweek, points - average > Decimal::ZERO);
            }
            columns.push(flags);
        }

        let table = WeekTable::from_columns(columns);

        let mut hottest: Option<StreakHighlight> = None;
        let mut coldest: Option<StreakHighlight> = None;
        for column in table.columns() {
            let (above, below) = longest_runs(column);
            if hottest.as_ref().map_or(true, |current| above > current.length) {
                hottest = Some(StreakHighlight {
                    entrant: column.entrant.clone(),
                    length: above,
                });
            }
            if coldest.as_ref().map_or(true, |current| below > current.length) {
                coldest = Some(StreakHighlight {
                    entrant: column.entrant.clone(),
                    length: below,
                });
            }
        }

        report.above_average = table;
        report.longest_above_average_streak = hottest;
        report.longest_below_average_streak = coldest;
        Ok(())
    }

    /// Calculates season transfer totals and above-average week counts.
    fn calculate_activity_totals(
        &self,
        tables: &LeagueTables,
        report: &mut LeagueReport,
    ) -> Result<(), AnalyticsError> {
        let mut transfer_totals: Vec<TransferTotal> = tables
            .transfers
            .columns()
            .iter()
            .map(|column| TransferTotal {
                entrant: column.entrant.clone(),
                transfers: column.iter().map(|(_, transfers)| transfers).sum(),
            })
            .collect();
        transfer_totals.sort_by_key(|total| Reverse(total.transfers));

        let mut above_average_counts: Vec<AboveAverageCount> = report
            .above_average
            .columns()
            .iter()
            .map(|column| AboveAverageCount {
                entrant: column.entrant.clone(),
                gameweeks: column.iter().filter(|(_, above)| *above).count() as u32,
            })
            .collect();
        above_average_counts.sort_by_key(|count| Reverse(count.gameweeks));

        report.transfer_totals = transfer_totals;
        report.above_average_counts = above_average_counts;
        Ok(())
    }
}

/// Longest run of consecutive `true` cells and of consecutive `false` cells,
/// in week order.
fn longest_runs(column: &WeekSeries<bool>) -> (u32, u32) {
    let mut longest_above = 0u32;
    let mut longest_below = 0u32;
    let mut current_above = 0u32;
    let mut current_below = 0u32;

    for (_, above) in column.iter() {
        if above {
            current_above += 1;
            current_below = 0;
        } else {
            current_below += 1;
            current_above = 0;
        }
        longest_above = longest_above.max(current_above);
        longest_below = longest_below.max(current_below);
    }

    (longest_above, longest_below)
}
