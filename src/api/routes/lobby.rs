use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    analyze_game_stats, analyze_match_stats, PopulationRankings, RankedEntry, RankingMetric,
};
use crate::models::{GameStats, MatchStats};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub matches: usize,
    pub first_match: Option<DateTime<Utc>>,
    pub last_match: Option<DateTime<Utc>>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let starts: Vec<DateTime<Utc>> = state.matches.iter().filter_map(|m| m.started_at()).collect();

    Json(HealthResponse {
        status: "ok",
        matches: state.matches.len(),
        first_match: starts.iter().min().copied(),
        last_match: starts.iter().max().copied(),
    })
}

/// Lobby-wide leaderboards and team tables.
pub async fn match_summary(State(state): State<AppState>) -> Json<MatchStats> {
    Json(analyze_match_stats(&state.matches, &state.aliases))
}

/// Bans, picks, maps and composition win rates.
pub async fn game_stats(State(state): State<AppState>) -> Json<GameStats> {
    Json(analyze_game_stats(&state.matches, &state.maps))
}

/// Every player of the lobby ranked by one metric.
pub async fn metric_ranking(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> Result<Json<Vec<RankedEntry>>, ApiError> {
    let metric = RankingMetric::from_name(&metric).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Unknown metric '{}' (expected damage, kills, assists or survival)",
            metric
        ))
    })?;

    let rankings = PopulationRankings::build(&state.matches, &state.aliases);
    Ok(Json(rankings.ranking(metric)))
}
