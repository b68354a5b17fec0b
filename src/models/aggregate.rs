//! Running per-player and per-team aggregates.

use serde::{Deserialize, Serialize};

use super::{PlayerKey, PlayerRecord};
use crate::calculate::{calculate_average, calculate_percentage, points_for};

/// Per-game series and sums for one (canonical player, team) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregate {
    pub key: PlayerKey,

    /// Per-game values, in match order
    pub kills: Vec<u32>,
    pub damage: Vec<u32>,
    pub assists: Vec<u32>,
    /// Seconds
    pub survival_times: Vec<u32>,

    pub knockdowns: u64,
    pub revives: u64,
    pub shots: u64,
    pub hits: u64,
    pub headshots: u64,

    /// Raw display names observed for this identity, first-seen order
    pub aliases: Vec<String>,
}

impl PlayerAggregate {
    pub fn new(key: PlayerKey) -> Self {
        Self {
            key,
            kills: Vec::new(),
            damage: Vec::new(),
            assists: Vec::new(),
            survival_times: Vec::new(),
            knockdowns: 0,
            revives: 0,
            shots: 0,
            hits: 0,
            headshots: 0,
            aliases: Vec::new(),
        }
    }

    /// Add one game's scoreboard line.
    pub fn add_game(&mut self, record: &PlayerRecord) {
        self.kills.push(record.kills);
        self.damage.push(record.damage_dealt);
        self.assists.push(record.assists);
        self.survival_times.push(record.survival_time);
        self.knockdowns += record.knockdowns as u64;
        self.revives += record.revives_given as u64;
        self.shots += record.shots as u64;
        self.hits += record.hits as u64;
        self.headshots += record.headshots as u64;
        if !self.aliases.contains(&record.player_name) {
            self.aliases.push(record.player_name.clone());
        }
    }

    pub fn games_played(&self) -> u32 {
        self.kills.len() as u32
    }

    pub fn total_kills(&self) -> u64 {
        sum(&self.kills)
    }

    pub fn total_damage(&self) -> u64 {
        sum(&self.damage)
    }

    pub fn total_assists(&self) -> u64 {
        sum(&self.assists)
    }

    pub fn total_survival_time(&self) -> u64 {
        sum(&self.survival_times)
    }

    pub fn avg_kills(&self) -> f64 {
        calculate_average(self.total_kills(), self.kills.len())
    }

    pub fn avg_damage(&self) -> f64 {
        calculate_average(self.total_damage(), self.damage.len())
    }

    pub fn avg_assists(&self) -> f64 {
        calculate_average(self.total_assists(), self.assists.len())
    }

    pub fn avg_survival_time(&self) -> f64 {
        calculate_average(self.total_survival_time(), self.survival_times.len())
    }

    pub fn max_kills(&self) -> u32 {
        self.kills.iter().copied().max().unwrap_or(0)
    }

    pub fn max_damage(&self) -> u32 {
        self.damage.iter().copied().max().unwrap_or(0)
    }

    pub fn max_assists(&self) -> u32 {
        self.assists.iter().copied().max().unwrap_or(0)
    }

    /// Hits per shot, in percent.
    pub fn accuracy(&self) -> f64 {
        calculate_percentage(self.hits, self.shots)
    }

    /// Headshots per hit, in percent.
    pub fn headshot_rate(&self) -> f64 {
        calculate_percentage(self.headshots, self.hits)
    }

    /// Canonical name, followed by the observed aliases when there were several.
    pub fn display_name(&self) -> String {
        if self.aliases.len() > 1 {
            format!("{} ({})", self.key.canonical, self.aliases.join(" / "))
        } else {
            self.key.canonical.clone()
        }
    }
}

fn sum(values: &[u32]) -> u64 {
    values.iter().map(|&v| v as u64).sum()
}

/// Placement series and hero pool of one team across a lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAggregate {
    pub team_name: String,

    /// One placement per match the team played
    pub placements: Vec<u32>,

    /// Points for each placement
    pub points: Vec<u32>,

    /// Distinct heroes fielded, first-seen order
    pub heroes: Vec<String>,
}

impl TeamAggregate {
    pub fn new(team_name: String) -> Self {
        Self {
            team_name,
            placements: Vec::new(),
            points: Vec::new(),
            heroes: Vec::new(),
        }
    }

    /// Record the squad result of one match.
    pub fn add_placement(&mut self, placement: u32) {
        self.placements.push(placement);
        self.points.push(points_for(placement));
    }

    pub fn add_hero(&mut self, hero: &str) {
        if !self.heroes.iter().any(|h| h == hero) {
            self.heroes.push(hero.to_string());
        }
    }

    pub fn games_played(&self) -> u32 {
        self.placements.len() as u32
    }

    pub fn avg_placement(&self) -> f64 {
        calculate_average(sum(&self.placements), self.placements.len())
    }

    pub fn avg_points(&self) -> f64 {
        calculate_average(sum(&self.points), self.points.len())
    }

    pub fn hero_variety(&self) -> u32 {
        self.heroes.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, kills: u32, damage: u32, assists: u32) -> PlayerRecord {
        PlayerRecord::new(name, "Wraith", "SUPERNOVA", "t1", 1)
            .with_combat(kills, damage, assists)
            .with_survival_time(600)
    }

    #[test]
    fn test_player_aggregate_sums_and_averages() {
        let mut agg = PlayerAggregate::new(PlayerKey::new("SN H", "SUPERNOVA"));
        agg.add_game(&record("SN H", 2, 500, 1));
        agg.add_game(&record("SN H", 4, 1100, 0));

        assert_eq!(agg.games_played(), 2);
        assert_eq!(agg.total_kills(), 6);
        assert_eq!(agg.total_damage(), 1600);
        assert_eq!(agg.avg_damage(), 800.0);
        assert_eq!(agg.max_damage(), 1100);
        assert_eq!(agg.max_assists(), 1);
        assert_eq!(agg.avg_survival_time(), 600.0);
    }

    #[test]
    fn test_player_aggregate_empty_is_zero() {
        let agg = PlayerAggregate::new(PlayerKey::new("x", "y"));
        assert_eq!(agg.games_played(), 0);
        assert_eq!(agg.avg_kills(), 0.0);
        assert_eq!(agg.max_kills(), 0);
        assert_eq!(agg.accuracy(), 0.0);
        assert_eq!(agg.headshot_rate(), 0.0);
    }

    #[test]
    fn test_player_aggregate_shooting_rates() {
        let mut agg = PlayerAggregate::new(PlayerKey::new("x", "y"));
        agg.add_game(&record("x", 0, 0, 0).with_shooting(200, 50, 10));

        assert_eq!(agg.accuracy(), 25.0);
        assert_eq!(agg.headshot_rate(), 20.0);
    }

    #[test]
    fn test_display_name_single_alias() {
        let mut agg = PlayerAggregate::new(PlayerKey::new("SN H", "SUPERNOVA"));
        agg.add_game(&record("SN H", 0, 0, 0));
        agg.add_game(&record("SN H", 0, 0, 0));

        assert_eq!(agg.aliases, vec!["SN H"]);
        assert_eq!(agg.display_name(), "SN H");
    }

    #[test]
    fn test_display_name_lists_aliases() {
        let mut agg = PlayerAggregate::new(PlayerKey::new("SN NINEimpulse", "SUPERNOVA"));
        agg.add_game(&record("SN BusDriver", 0, 0, 0));
        agg.add_game(&record("SN NINEimpulse", 0, 0, 0));

        assert_eq!(
            agg.display_name(),
            "SN NINEimpulse (SN BusDriver / SN NINEimpulse)"
        );
    }

    #[test]
    fn test_team_aggregate() {
        let mut team = TeamAggregate::new("SUPERNOVA".to_string());
        team.add_placement(1);
        team.add_placement(4);
        team.add_hero("Wraith");
        team.add_hero("Lifeline");
        team.add_hero("Wraith");

        assert_eq!(team.points, vec![12, 5]);
        assert_eq!(team.avg_placement(), 2.5);
        assert_eq!(team.avg_points(), 8.5);
        assert_eq!(team.hero_variety(), 2);
        assert_eq!(team.games_played(), 2);
    }

    #[test]
    fn test_team_aggregate_empty() {
        let team = TeamAggregate::new("empty".to_string());
        assert_eq!(team.avg_placement(), 0.0);
        assert_eq!(team.avg_points(), 0.0);
    }
}
