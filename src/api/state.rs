use std::sync::Arc;

use crate::calculate::{AliasTable, MapNames};
use crate::models::MatchRecord;

/// Immutable data shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub matches: Arc<Vec<MatchRecord>>,
    pub aliases: Arc<AliasTable>,
    pub maps: Arc<MapNames>,
    pub cors_origin: Arc<str>,
}

impl AppState {
    /// State over `matches` with no aliases and the built-in map names.
    pub fn new(matches: Vec<MatchRecord>) -> Self {
        Self {
            matches: Arc::new(matches),
            aliases: Arc::new(AliasTable::empty()),
            maps: Arc::new(MapNames::default()),
            cors_origin: Arc::from("*"),
        }
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = Arc::new(aliases);
        self
    }

    pub fn with_maps(mut self, maps: MapNames) -> Self {
        self.maps = Arc::new(maps);
        self
    }

    pub fn with_cors_origin(mut self, origin: &str) -> Self {
        self.cors_origin = Arc::from(origin);
        self
    }

    /// Whether any match has a squad registered under `team_name`.
    pub fn has_team(&self, team_name: &str) -> bool {
        self.matches
            .iter()
            .any(|m| m.team_players(team_name).next().is_some())
    }
}
