//! Raw lobby match records as produced by the scoreboard scraper.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ingestion-time invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("match {match_id}: squad {team_id} has placements {expected} and {found}")]
    InconsistentPlacement {
        match_id: String,
        team_id: String,
        expected: u32,
        found: u32,
    },
}

/// One player's line on a match scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Display name as shown in the lobby (may be an alias)
    pub player_name: String,

    /// Hero (legend) picked for this match
    #[serde(rename = "character_name")]
    pub hero: String,

    /// Team display name
    pub team_name: String,

    /// Lobby slot number of the team
    #[serde(default)]
    pub team_num: u32,

    /// Squad identifier, unique within one match
    pub team_id: String,

    /// Final squad placement (1 = best)
    #[serde(rename = "team_placement")]
    pub placement: u32,

    #[serde(default)]
    pub kills: u32,

    #[serde(default)]
    pub damage_dealt: u32,

    #[serde(default)]
    pub assists: u32,

    #[serde(default)]
    pub shots: u32,

    #[serde(default)]
    pub hits: u32,

    #[serde(default)]
    pub headshots: u32,

    #[serde(default)]
    pub knockdowns: u32,

    #[serde(default)]
    pub revives_given: u32,

    /// Survival time in seconds
    #[serde(default)]
    pub survival_time: u32,
}

impl PlayerRecord {
    /// Create a record with zeroed combat stats.
    pub fn new(
        player_name: impl Into<String>,
        hero: impl Into<String>,
        team_name: impl Into<String>,
        team_id: impl Into<String>,
        placement: u32,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            hero: hero.into(),
            team_name: team_name.into(),
            team_num: 0,
            team_id: team_id.into(),
            placement,
            kills: 0,
            damage_dealt: 0,
            assists: 0,
            shots: 0,
            hits: 0,
            headshots: 0,
            knockdowns: 0,
            revives_given: 0,
            survival_time: 0,
        }
    }

    /// Builder method to set kills, damage and assists.
    pub fn with_combat(mut self, kills: u32, damage_dealt: u32, assists: u32) -> Self {
        self.kills = kills;
        self.damage_dealt = damage_dealt;
        self.assists = assists;
        self
    }

    /// Builder method to set shooting stats.
    pub fn with_shooting(mut self, shots: u32, hits: u32, headshots: u32) -> Self {
        self.shots = shots;
        self.hits = hits;
        self.headshots = headshots;
        self
    }

    /// Builder method to set knockdowns and revives.
    pub fn with_support(mut self, knockdowns: u32, revives_given: u32) -> Self {
        self.knockdowns = knockdowns;
        self.revives_given = revives_given;
        self
    }

    /// Builder method to set survival time in seconds.
    pub fn with_survival_time(mut self, seconds: u32) -> Self {
        self.survival_time = seconds;
        self
    }
}

/// A single match of a lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "mid")]
    pub match_id: String,

    /// Internal map code (e.g. `mp_rr_district_mu1`)
    #[serde(rename = "map_name")]
    pub map_code: String,

    #[serde(default)]
    pub aim_assist_allowed: bool,

    /// Start timestamp as reported by the lobby
    #[serde(default)]
    pub match_start: String,

    /// Banned hero, empty when no ban was applied
    #[serde(default)]
    pub ban: String,

    /// Every player of every squad in the match
    #[serde(rename = "data", default)]
    pub players: Vec<PlayerRecord>,
}

impl MatchRecord {
    pub fn new(match_id: impl Into<String>, map_code: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            map_code: map_code.into(),
            aim_assist_allowed: false,
            match_start: String::new(),
            ban: String::new(),
            players: Vec::new(),
        }
    }

    /// Builder method to set the banned hero.
    pub fn with_ban(mut self, ban: impl Into<String>) -> Self {
        self.ban = ban.into();
        self
    }

    /// Builder method to append a player line.
    pub fn with_player(mut self, player: PlayerRecord) -> Self {
        self.players.push(player);
        self
    }

    /// Parse `match_start` as an RFC 3339 timestamp.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.match_start)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Players of the named team, in scoreboard order.
    pub fn team_players<'a>(&'a self, team_name: &'a str) -> impl Iterator<Item = &'a PlayerRecord> {
        self.players.iter().filter(move |p| p.team_name == team_name)
    }

    /// Check that every squad shares a single placement.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen: HashMap<&str, u32> = HashMap::new();
        for player in &self.players {
            let expected = *seen
                .entry(player.team_id.as_str())
                .or_insert(player.placement);
            if expected != player.placement {
                return Err(ValidationError::InconsistentPlacement {
                    match_id: self.match_id.clone(),
                    team_id: player.team_id.clone(),
                    expected,
                    found: player.placement,
                });
            }
        }
        Ok(())
    }
}

/// Top-level document of a lobby score file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchData {
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}
