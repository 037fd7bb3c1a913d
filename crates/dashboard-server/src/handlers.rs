use crate::{AppState, error::DashboardError};
use aggregator::Aggregator;
use analytics::{AnalyticsEngine, LeagueReport};
use api_client::FplApi;
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use core_types::LeagueTables;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Envelope for the `/api/report` payload.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub league: String,
    pub generated_at: DateTime<Utc>,
    pub report: LeagueReport,
}

/// Envelope for the `/api/tables` payload.
#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub league: String,
    pub generated_at: DateTime<Utc>,
    pub tables: LeagueTables,
}

/// # GET /api/report
/// Fetches the league data (served from the session cache when warm) and
/// returns the full derived statistics report.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReportResponse>, DashboardError> {
    let tables = build_tables(&state).await?;
    let report = AnalyticsEngine::new().calculate(&tables)?;

    Ok(Json(ReportResponse {
        league: state.config.league.name.clone(),
        generated_at: Utc::now(),
        report,
    }))
}

/// # GET /api/tables
/// Returns the raw aligned gameweek tables for frontends that chart the
/// underlying numbers themselves.
pub async fn get_tables(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TablesResponse>, DashboardError> {
    let tables = build_tables(&state).await?;

    Ok(Json(TablesResponse {
        league: state.config.league.name.clone(),
        generated_at: Utc::now(),
        tables,
    }))
}

/// # POST /api/refresh
/// Drops the session cache so the next request re-fetches from the FPL API.
pub async fn refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    state.api.clear().await;
    tracing::info!("Session cache cleared");
    StatusCode::NO_CONTENT
}

/// Fetches every roster history plus the gameweek summaries, one request at a
/// time, and aggregates them into the aligned league tables.
async fn build_tables(state: &AppState) -> Result<LeagueTables, DashboardError> {
    let mut histories = HashMap::new();
    for entrant in &state.config.league.entrants {
        let records = state.api.entry_history(entrant.id).await?;
        histories.insert(entrant.id, records);
    }
    let summaries = state.api.gameweek_summaries().await?;

    let aggregator = Aggregator::new(state.config.league.entrants.clone());
    Ok(aggregator.aggregate(&histories, &summaries)?)
}
