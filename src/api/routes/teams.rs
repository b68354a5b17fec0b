use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{analyze_player_stats, analyze_team, rank_players};
use crate::models::{PlayerStats, TeamPerformance, TeamRankings};

fn require_team(state: &AppState, team: &str) -> Result<(), ApiError> {
    if state.has_team(team) {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Team '{}' has no matches", team)))
    }
}

/// Placement series, picks and composition breakdown of one team.
pub async fn team_performance(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<TeamPerformance>, ApiError> {
    require_team(&state, &team)?;
    Ok(Json(analyze_team(&state.matches, &team, &state.maps)))
}

/// Per-player statistics of one team.
pub async fn team_players(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<Vec<PlayerStats>>, ApiError> {
    require_team(&state, &team)?;
    Ok(Json(analyze_player_stats(&state.matches, &team, &state.aliases)))
}

/// Lobby-wide standings of one team's players.
pub async fn team_rankings(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<TeamRankings>, ApiError> {
    require_team(&state, &team)?;
    Ok(Json(rank_players(&state.matches, &team, &state.aliases)))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::calculate::AliasTable;
    use crate::models::{MatchRecord, PlayerRecord};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn lobby() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new("m1", "mp_rr_desertlands_hu")
                .with_player(
                    PlayerRecord::new("SN BusDriver", "Wraith", "SUPERNOVA", "1", 1)
                        .with_combat(4, 1200, 1)
                        .with_shooting(100, 50, 10),
                )
                .with_player(PlayerRecord::new("SN Kazakh", "Lifeline", "SUPERNOVA", "1", 1).with_combat(1, 400, 3))
                .with_player(PlayerRecord::new("SN H", "Bangalore", "SUPERNOVA", "1", 1).with_combat(2, 800, 2))
                .with_player(PlayerRecord::new("Ace", "Horizon", "RIVALS", "2", 8).with_combat(6, 1500, 0)),
            MatchRecord::new("m2", "mp_rr_district_mu1")
                .with_player(
                    PlayerRecord::new("SN NINEimpulse", "Wraith", "SUPERNOVA", "1", 5)
                        .with_combat(2, 600, 0)
                        .with_shooting(100, 50, 5),
                )
                .with_player(PlayerRecord::new("SN Kazakh", "Lifeline", "SUPERNOVA", "1", 5).with_combat(0, 200, 1))
                .with_player(PlayerRecord::new("SN H", "Bangalore", "SUPERNOVA", "1", 5).with_combat(1, 300, 1))
                .with_player(PlayerRecord::new("Ace", "Horizon", "RIVALS", "2", 2).with_combat(3, 900, 1)),
        ]
    }

    fn state() -> AppState {
        let aliases = AliasTable::from_entries(vec![(
            "SN NINEimpulse",
            vec!["SN NINEimpulse", "SN BusDriver"],
        )])
        .unwrap();
        AppState::new(lobby()).with_aliases(aliases)
    }

    #[tokio::test]
    async fn test_team_performance() {
        let (status, json) = get_json(build_router(state()), "/api/teams/SUPERNOVA").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_matches"], 2);
        assert_eq!(json["placements"], serde_json::json!([1, 5]));
        assert_eq!(json["points"], serde_json::json!([12, 5]));
        assert_eq!(json["max_points"], 12);
        assert_eq!(json["compositions"][0]["games_played"], 2);
        assert_eq!(json["compositions"][0]["best_placement"], 1);
    }

    #[tokio::test]
    async fn test_team_players_merges_aliases() {
        let (status, json) = get_json(build_router(state()), "/api/teams/SUPERNOVA/players").await;

        assert_eq!(status, StatusCode::OK);
        let players = json.as_array().unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players[0]["canonical_name"], "SN NINEimpulse");
        assert_eq!(players[0]["games_played"], 2);
        assert_eq!(players[0]["total_damage"], 1800);
        assert_eq!(players[0]["accuracy"], 50.0);
    }

    #[tokio::test]
    async fn test_team_rankings() {
        let (status, json) = get_json(build_router(state()), "/api/teams/SUPERNOVA/rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_players"], 4);
        // Ace averages 1200 damage, NINEimpulse 900
        assert_eq!(json["players"][0]["damage"]["rank"], 2);
    }

    #[tokio::test]
    async fn test_team_with_space_in_name() {
        let matches = vec![MatchRecord::new("m1", "map")
            .with_player(PlayerRecord::new("p", "Wraith", "Team Liquid", "1", 3))];
        let app = build_router(AppState::new(matches));
        let (status, json) = get_json(app, "/api/teams/Team%20Liquid").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["team_name"], "Team Liquid");
    }

    #[tokio::test]
    async fn test_unknown_team_is_404() {
        for uri in [
            "/api/teams/NOBODY",
            "/api/teams/NOBODY/players",
            "/api/teams/NOBODY/rankings",
        ] {
            let (status, json) = get_json(build_router(state()), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(json["error"]["code"], "NOT_FOUND");
        }
    }
}
