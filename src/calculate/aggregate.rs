//! Per-player and per-team aggregation over a lobby.

use std::collections::HashSet;

use tracing::debug;

use super::aliases::AliasTable;
use super::Grouped;
use crate::models::{
    MatchRecord, MatchStats, PlayerAggregate, PlayerKey, PlayerRecord, PlayerStats,
    TeamAggregate, TeamSummary, TopPlayer,
};

/// Rows kept in each leaderboard of [`MatchStats`].
pub const LEADERBOARD_SIZE: usize = 10;

/// Group every player record by (canonical name, team name).
///
/// Result is in first-seen order.
pub fn aggregate_players(matches: &[MatchRecord], aliases: &AliasTable) -> Vec<PlayerAggregate> {
    collect_players(matches, aliases, |_| true)
}

fn collect_players(
    matches: &[MatchRecord],
    aliases: &AliasTable,
    include: impl Fn(&PlayerRecord) -> bool,
) -> Vec<PlayerAggregate> {
    let mut players: Grouped<PlayerKey, PlayerAggregate> = Grouped::new();

    for m in matches {
        for record in m.players.iter().filter(|p| include(p)) {
            let key = PlayerKey::new(aliases.canonicalize(&record.player_name), &record.team_name);
            players
                .get_or_insert_with(key.clone(), || PlayerAggregate::new(key))
                .add_game(record);
        }
    }

    players.into_entries().into_iter().map(|(_, agg)| agg).collect()
}

/// Group squads by team name: one placement per team per match, plus
/// the pool of distinct heroes each team fielded.
pub fn aggregate_teams(matches: &[MatchRecord]) -> Vec<TeamAggregate> {
    let mut teams: Grouped<String, TeamAggregate> = Grouped::new();

    for m in matches {
        let mut counted: HashSet<&str> = HashSet::new();
        for record in &m.players {
            let team = teams.get_or_insert_with(record.team_name.clone(), || {
                TeamAggregate::new(record.team_name.clone())
            });
            if counted.insert(record.team_name.as_str()) {
                team.add_placement(record.placement);
            }
            team.add_hero(&record.hero);
        }
    }

    teams.into_entries().into_iter().map(|(_, agg)| agg).collect()
}

/// Lobby-wide player leaderboards and team tables.
pub fn analyze_match_stats(matches: &[MatchRecord], aliases: &AliasTable) -> MatchStats {
    debug!("Aggregating match stats over {} matches", matches.len());

    let players = aggregate_players(matches, aliases);
    let teams: Vec<TeamSummary> = aggregate_teams(matches)
        .iter()
        .map(|t| TeamSummary {
            team_name: t.team_name.clone(),
            avg_placement: t.avg_placement(),
            avg_points: t.avg_points(),
            total_games: t.games_played(),
            hero_variety: t.hero_variety(),
        })
        .collect();

    let mut by_points = teams.clone();
    by_points.sort_by(|a, b| b.avg_points.total_cmp(&a.avg_points));
    by_points.truncate(LEADERBOARD_SIZE);

    let mut by_placement = teams.clone();
    by_placement.sort_by(|a, b| a.avg_placement.total_cmp(&b.avg_placement));
    by_placement.truncate(LEADERBOARD_SIZE);

    let mut by_variety = teams;
    by_variety.sort_by(|a, b| b.hero_variety.cmp(&a.hero_variety));
    by_variety.truncate(LEADERBOARD_SIZE);

    MatchStats {
        top_damage_players: leaderboard(&players, |p| (p.avg_damage(), p.total_damage())),
        top_kills_players: leaderboard(&players, |p| (p.avg_kills(), p.total_kills())),
        top_assists_players: leaderboard(&players, |p| (p.avg_assists(), p.total_assists())),
        top_survival_players: leaderboard(&players, |p| {
            (p.avg_survival_time(), p.total_survival_time())
        }),
        best_teams_by_points: by_points,
        best_teams_by_placement: by_placement,
        most_diverse_teams: by_variety,
    }
}

fn leaderboard(
    players: &[PlayerAggregate],
    metric: impl Fn(&PlayerAggregate) -> (f64, u64),
) -> Vec<TopPlayer> {
    let mut rows: Vec<TopPlayer> = players
        .iter()
        .map(|p| {
            let (avg_value, total_value) = metric(p);
            TopPlayer {
                player_name: p.display_name(),
                team_name: p.key.team.clone(),
                avg_value,
                total_value,
                games_played: p.games_played(),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.avg_value.total_cmp(&a.avg_value));
    rows.truncate(LEADERBOARD_SIZE);
    rows
}

/// Personal statistics of every player who played for `team_name`.
pub fn analyze_player_stats(
    matches: &[MatchRecord],
    team_name: &str,
    aliases: &AliasTable,
) -> Vec<PlayerStats> {
    debug!("Aggregating player stats for team '{}'", team_name);

    collect_players(matches, aliases, |p| p.team_name == team_name)
        .iter()
        .map(|agg| PlayerStats {
            player_name: agg.display_name(),
            canonical_name: agg.key.canonical.clone(),
            aliases: agg.aliases.clone(),
            games_played: agg.games_played(),
            total_kills: agg.total_kills(),
            avg_kills: agg.avg_kills(),
            max_kills: agg.max_kills(),
            total_damage: agg.total_damage(),
            avg_damage: agg.avg_damage(),
            max_damage: agg.max_damage(),
            total_assists: agg.total_assists(),
            avg_assists: agg.avg_assists(),
            max_assists: agg.max_assists(),
            avg_survival_time: agg.avg_survival_time(),
            total_knockdowns: agg.knockdowns,
            total_revives: agg.revives,
            total_shots: agg.shots,
            total_hits: agg.hits,
            total_headshots: agg.headshots,
            accuracy: agg.accuracy(),
            headshot_rate: agg.headshot_rate(),
        })
        .collect()
}
