//! Derived statistics models.
//!
//! Every analyzer returns one of these plain, serializable structures.
//! Nothing here formats text; rendering is left to the caller.

use serde::{Deserialize, Serialize};

use super::CompositionKey;
use crate::calculate::{calculate_average, calculate_percentage};

/// Win/loss tally where a win is a top-3 squad finish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl WinLoss {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    /// Count one game.
    pub fn record(&mut self, is_win: bool) {
        if is_win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win rate in percent (0 when no games).
    pub fn win_rate(&self) -> f64 {
        calculate_percentage(self.wins as u64, self.total_games() as u64)
    }

    /// Lose rate in percent (0 when no games).
    pub fn lose_rate(&self) -> f64 {
        if self.total_games() == 0 {
            0.0
        } else {
            100.0 - self.win_rate()
        }
    }
}

/// Win/loss statistics of one hero composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionStats {
    pub heroes: CompositionKey,
    pub wins: u32,
    pub losses: u32,
    pub total_games: u32,
    /// Percent, 0 to 100
    pub win_rate: f64,
    /// Percent, `100 - win_rate` (0 when no games)
    pub lose_rate: f64,
}

impl CompositionStats {
    pub fn new(heroes: CompositionKey, record: WinLoss) -> Self {
        Self {
            heroes,
            wins: record.wins,
            losses: record.losses,
            total_games: record.total_games(),
            win_rate: record.win_rate(),
            lose_rate: record.lose_rate(),
        }
    }
}

/// Compositions played on one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCompositions {
    /// Map display name
    pub map: String,
    pub compositions: Vec<CompositionStats>,
}

/// Per-hero pick count and win/loss.
///
/// `total_picks` counts every scoreboard line; `wins`/`losses` only
/// count squads that qualified for composition analysis. `lose_rate` is
/// `losses / games`, not the complement of `win_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroStats {
    pub hero: String,
    pub total_picks: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub lose_rate: f64,
}

impl HeroStats {
    pub fn new(hero: String, total_picks: u32, record: WinLoss) -> Self {
        Self {
            hero,
            total_picks,
            wins: record.wins,
            losses: record.losses,
            win_rate: record.win_rate(),
            lose_rate: calculate_percentage(record.losses as u64, record.total_games() as u64),
        }
    }
}

/// A named counter (bans, picks, maps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub name: String,
    pub count: u32,
}

/// Lobby-wide hero, ban, map and composition statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    /// Number of matches analyzed
    pub total_maps: u32,

    /// Ban counts, most frequent first
    pub bans: Vec<CountEntry>,

    /// Top-5 banned heroes
    pub most_frequent_bans: Vec<String>,

    /// Hero pick counts over every player record, most picked first
    pub hero_picks: Vec<CountEntry>,

    /// Map play counts by display name, most played first
    pub map_plays: Vec<CountEntry>,

    /// Compositions with at least 2 games, best win rate first
    pub compositions: Vec<CompositionStats>,

    /// Top-5 surfaced compositions by games played
    pub most_popular_compositions: Vec<CompositionStats>,

    /// Top-5 surfaced compositions by lowest win rate
    pub most_losing_compositions: Vec<CompositionStats>,

    /// All compositions per map, best win rate first
    pub compositions_by_map: Vec<MapCompositions>,

    /// Per-hero stats, most picked first
    pub heroes: Vec<HeroStats>,
}

impl GameStats {
    /// Compositions for a map display name.
    pub fn compositions_on(&self, map: &str) -> Option<&[CompositionStats]> {
        self.compositions_by_map
            .iter()
            .find(|m| m.map == map)
            .map(|m| m.compositions.as_slice())
    }

    /// Get hero stats by name.
    pub fn hero(&self, name: &str) -> Option<&HeroStats> {
        self.heroes.iter().find(|h| h.hero == name)
    }
}

/// One row of a "top players" table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPlayer {
    pub player_name: String,
    pub team_name: String,
    pub avg_value: f64,
    pub total_value: u64,
    pub games_played: u32,
}

/// Lobby-wide summary of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_name: String,
    pub avg_placement: f64,
    pub avg_points: f64,
    pub total_games: u32,
    /// Distinct heroes fielded across all matches
    pub hero_variety: u32,
}

/// Lobby-wide player and team leaderboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub top_damage_players: Vec<TopPlayer>,
    pub top_kills_players: Vec<TopPlayer>,
    pub top_assists_players: Vec<TopPlayer>,
    /// Survival in seconds
    pub top_survival_players: Vec<TopPlayer>,
    pub best_teams_by_points: Vec<TeamSummary>,
    pub best_teams_by_placement: Vec<TeamSummary>,
    pub most_diverse_teams: Vec<TeamSummary>,
}

/// Personal statistics of one player of a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Canonical name, with observed aliases when more than one
    pub player_name: String,
    pub canonical_name: String,
    pub aliases: Vec<String>,
    pub games_played: u32,

    pub total_kills: u64,
    pub avg_kills: f64,
    pub max_kills: u32,

    pub total_damage: u64,
    pub avg_damage: f64,
    pub max_damage: u32,

    pub total_assists: u64,
    pub avg_assists: f64,
    pub max_assists: u32,

    /// Seconds
    pub avg_survival_time: f64,

    pub total_knockdowns: u64,
    pub total_revives: u64,

    pub total_shots: u64,
    pub total_hits: u64,
    pub total_headshots: u64,
    /// hits / shots, percent
    pub accuracy: f64,
    /// headshots / hits, percent
    pub headshot_rate: f64,
}

/// Placement summary over a set of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementPerformance {
    pub avg_placement: f64,
    pub best_placement: u32,
    pub worst_placement: u32,
    pub games_played: u32,
}

impl PlacementPerformance {
    /// Summarize a placement series; all zero when empty.
    pub fn from_placements(placements: &[u32]) -> Self {
        let total: u64 = placements.iter().map(|&p| p as u64).sum();
        Self {
            avg_placement: calculate_average(total, placements.len()),
            best_placement: placements.iter().copied().min().unwrap_or(0),
            worst_placement: placements.iter().copied().max().unwrap_or(0),
            games_played: placements.len() as u32,
        }
    }
}

/// A team's placement record with one composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionPerformance {
    pub heroes: CompositionKey,
    #[serde(flatten)]
    pub performance: PlacementPerformance,
}

/// A team's placement record with one hero in the squad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroPerformance {
    pub hero: String,
    #[serde(flatten)]
    pub performance: PlacementPerformance,
}

/// Match-by-match performance of one team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPerformance {
    pub team_name: String,
    pub total_matches: u32,

    /// Placement per match, in match order
    pub placements: Vec<u32>,

    /// Tournament points per match, in match order
    pub points: Vec<u32>,

    pub avg_placement: f64,
    pub avg_points_per_game: f64,
    pub max_points: u32,
    pub min_points: u32,

    /// Hero pick counts among the team's players, most picked first
    pub hero_picks: Vec<CountEntry>,

    /// Maps played by the team, most played first
    pub map_plays: Vec<CountEntry>,

    /// Best average placement first
    pub compositions: Vec<CompositionPerformance>,

    /// Best average placement first
    pub heroes: Vec<HeroPerformance>,
}

impl TeamPerformance {
    /// Total tournament points over the series.
    pub fn total_points(&self) -> u32 {
        self.points.iter().sum()
    }
}

/// A player's standing in one metric ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStanding {
    /// 1-based position
    pub rank: u32,
    pub total: u64,
    pub average: f64,
}

/// A team player's position among every player of the lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub player_name: String,
    pub canonical_name: String,
    pub team_name: String,
    pub games_played: u32,
    pub damage: MetricStanding,
    pub kills: MetricStanding,
    pub assists: MetricStanding,
    /// Seconds
    pub survival: MetricStanding,
    pub total_players: u32,
}

/// Rankings of one team's players.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRankings {
    pub team_name: String,
    pub total_players: u32,
    pub players: Vec<PlayerRanking>,
}
