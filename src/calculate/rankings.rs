//! Lobby-wide player rankings.
//!
//! Every (canonical player, team) pair in the lobby is ranked by its
//! per-game average in four metrics. Sorting is stable over first-seen
//! order, so players with equal averages keep the order in which they
//! first appeared in the match list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::aggregate_players;
use super::aliases::AliasTable;
use crate::models::{
    MatchRecord, MetricStanding, PlayerAggregate, PlayerKey, PlayerRanking, TeamRankings,
};

/// A ranked per-player metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    Damage,
    Kills,
    Assists,
    /// Survival time in seconds
    Survival,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 4] = [
        RankingMetric::Damage,
        RankingMetric::Kills,
        RankingMetric::Assists,
        RankingMetric::Survival,
    ];

    /// Metric for its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "damage" => Some(RankingMetric::Damage),
            "kills" => Some(RankingMetric::Kills),
            "assists" => Some(RankingMetric::Assists),
            "survival" => Some(RankingMetric::Survival),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            RankingMetric::Damage => 0,
            RankingMetric::Kills => 1,
            RankingMetric::Assists => 2,
            RankingMetric::Survival => 3,
        }
    }

    pub fn total(self, player: &PlayerAggregate) -> u64 {
        match self {
            RankingMetric::Damage => player.total_damage(),
            RankingMetric::Kills => player.total_kills(),
            RankingMetric::Assists => player.total_assists(),
            RankingMetric::Survival => player.total_survival_time(),
        }
    }

    pub fn average(self, player: &PlayerAggregate) -> f64 {
        match self {
            RankingMetric::Damage => player.avg_damage(),
            RankingMetric::Kills => player.avg_kills(),
            RankingMetric::Assists => player.avg_assists(),
            RankingMetric::Survival => player.avg_survival_time(),
        }
    }
}

/// One row of a full metric ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: u32,
    pub key: PlayerKey,
    pub player_name: String,
    pub average: f64,
    pub total: u64,
}

/// Sorted order of one metric plus the reverse lookup.
#[derive(Debug, Clone)]
struct MetricOrder {
    /// Player indices, best first
    order: Vec<usize>,
    /// `rank[player] = 1-based position`
    rank: Vec<u32>,
}

impl MetricOrder {
    fn build(players: &[PlayerAggregate], metric: RankingMetric) -> Self {
        let averages: Vec<f64> = players.iter().map(|p| metric.average(p)).collect();
        let mut order: Vec<usize> = (0..players.len()).collect();
        order.sort_by(|&a, &b| averages[b].total_cmp(&averages[a]));

        let mut rank = vec![0; players.len()];
        for (pos, &idx) in order.iter().enumerate() {
            rank[idx] = pos as u32 + 1;
        }
        Self { order, rank }
    }
}

/// Every player of a lobby ranked by damage, kills, assists and survival.
#[derive(Debug, Clone)]
pub struct PopulationRankings {
    players: Vec<PlayerAggregate>,
    orders: [MetricOrder; 4],
}

impl PopulationRankings {
    /// Aggregate the whole lobby and rank it.
    pub fn build(matches: &[MatchRecord], aliases: &AliasTable) -> Self {
        let players = aggregate_players(matches, aliases);
        debug!("Ranking {} players", players.len());

        let orders = RankingMetric::ALL.map(|metric| MetricOrder::build(&players, metric));
        Self { players, orders }
    }

    /// Size of the ranked population.
    pub fn total_players(&self) -> u32 {
        self.players.len() as u32
    }

    /// Full ranking for a metric, best first.
    pub fn ranking(&self, metric: RankingMetric) -> Vec<RankedEntry> {
        self.orders[metric.index()]
            .order
            .iter()
            .enumerate()
            .map(|(pos, &idx)| {
                let player = &self.players[idx];
                RankedEntry {
                    rank: pos as u32 + 1,
                    key: player.key.clone(),
                    player_name: player.display_name(),
                    average: metric.average(player),
                    total: metric.total(player),
                }
            })
            .collect()
    }

    fn standing_at(&self, idx: usize, metric: RankingMetric) -> MetricStanding {
        let player = &self.players[idx];
        MetricStanding {
            rank: self.orders[metric.index()].rank[idx],
            total: metric.total(player),
            average: metric.average(player),
        }
    }

    /// Standings of every player registered under `team_name`.
    pub fn team_rankings(&self, team_name: &str) -> TeamRankings {
        let total_players = self.total_players();
        let players = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.key.team == team_name)
            .map(|(idx, p)| PlayerRanking {
                player_name: p.display_name(),
                canonical_name: p.key.canonical.clone(),
                team_name: p.key.team.clone(),
                games_played: p.games_played(),
                damage: self.standing_at(idx, RankingMetric::Damage),
                kills: self.standing_at(idx, RankingMetric::Kills),
                assists: self.standing_at(idx, RankingMetric::Assists),
                survival: self.standing_at(idx, RankingMetric::Survival),
                total_players,
            })
            .collect();

        TeamRankings {
            team_name: team_name.to_string(),
            total_players,
            players,
        }
    }
}

/// Rank the lobby and report the standings of `team_name`'s players.
pub fn rank_players(matches: &[MatchRecord], team_name: &str, aliases: &AliasTable) -> TeamRankings {
    PopulationRankings::build(matches, aliases).team_rankings(team_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRecord;
    use pretty_assertions::assert_eq;

    fn line(name: &str, team: &str, kills: u32, damage: u32, assists: u32, survival: u32) -> PlayerRecord {
        PlayerRecord::new(name, "Wraith", team, team, 1)
            .with_combat(kills, damage, assists)
            .with_survival_time(survival)
    }

    fn lobby() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new("m1", "map")
                .with_player(line("SN BusDriver", "SUPERNOVA", 3, 900, 1, 1200))
                .with_player(line("SN H", "SUPERNOVA", 1, 300, 2, 1200))
                .with_player(line("Ace", "RIVALS", 5, 1500, 0, 600))
                .with_player(line("Tank", "RIVALS", 0, 100, 4, 1500)),
            MatchRecord::new("m2", "map")
                .with_player(line("SN NINEimpulse", "SUPERNOVA", 1, 300, 1, 1000))
                .with_player(line("SN H", "SUPERNOVA", 2, 500, 0, 1000))
                .with_player(line("Ace", "RIVALS", 3, 1100, 1, 400)),
        ]
    }

    fn aliases() -> AliasTable {
        AliasTable::from_entries(vec![("SN NINEimpulse", vec!["SN NINEimpulse", "SN BusDriver"])])
            .unwrap()
    }

    #[test]
    fn test_population_size() {
        let rankings = PopulationRankings::build(&lobby(), &aliases());
        assert_eq!(rankings.total_players(), 4);
    }

    #[test]
    fn test_rank_one_has_maximum_value() {
        let rankings = PopulationRankings::build(&lobby(), &aliases());

        for metric in RankingMetric::ALL {
            let list = rankings.ranking(metric);
            let max = list
                .iter()
                .map(|e| e.average)
                .fold(f64::MIN, f64::max);
            assert_eq!(list[0].rank, 1);
            assert_eq!(list[0].average, max, "{:?}", metric);
            assert!(list.windows(2).all(|w| w[0].average >= w[1].average));
        }
    }

    #[test]
    fn test_team_standings() {
        let team = rank_players(&lobby(), "SUPERNOVA", &aliases());

        assert_eq!(team.total_players, 4);
        assert_eq!(team.players.len(), 2);

        let nine = &team.players[0];
        assert_eq!(nine.player_name, "SN NINEimpulse (SN BusDriver / SN NINEimpulse)");
        assert_eq!(nine.games_played, 2);
        // Damage averages: Ace 1300, NINE 600, H 400, Tank 100
        assert_eq!(nine.damage, MetricStanding { rank: 2, total: 1200, average: 600.0 });
        assert_eq!(nine.kills.rank, 2);

        let h = &team.players[1];
        assert_eq!(h.damage.rank, 3);
        // Tied with NINEimpulse on survival; seen later, so ranked below
        assert_eq!(h.survival, MetricStanding { rank: 3, total: 2200, average: 1100.0 });
        assert_eq!(h.total_players, 4);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let matches = vec![MatchRecord::new("m1", "map")
            .with_player(line("early", "A", 2, 500, 0, 0))
            .with_player(line("late", "B", 2, 500, 0, 0))];

        let rankings = PopulationRankings::build(&matches, &AliasTable::empty());
        let kills = rankings.ranking(RankingMetric::Kills);

        assert_eq!(kills[0].player_name, "early");
        assert_eq!(kills[1].player_name, "late");
        assert_eq!(kills[1].rank, 2);
    }

    #[test]
    fn test_full_ranking_rows() {
        let rankings = PopulationRankings::build(&lobby(), &aliases());
        let assists = rankings.ranking(RankingMetric::Assists);

        assert_eq!(assists.len(), 4);
        assert_eq!(assists[0].key, PlayerKey::new("Tank", "RIVALS"));
        assert_eq!(assists[0].total, 4);
        assert_eq!(assists[0].average, 4.0);
    }

    #[test]
    fn test_metric_from_name() {
        assert_eq!(RankingMetric::from_name("survival"), Some(RankingMetric::Survival));
        assert_eq!(RankingMetric::from_name("Damage"), None);
        assert_eq!(RankingMetric::from_name("headshots"), None);
    }

    #[test]
    fn test_empty_lobby() {
        let team = rank_players(&[], "SUPERNOVA", &AliasTable::empty());
        assert_eq!(team.total_players, 0);
        assert!(team.players.is_empty());
    }
}
