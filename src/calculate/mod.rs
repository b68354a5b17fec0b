//! Statistics calculation engine.
//!
//! Computes derived metrics from lobby match records:
//! - Player and team aggregates (`aggregate`)
//! - Hero composition win/loss tables (`compositions`)
//! - Single-team performance breakdowns (`team`)
//! - Lobby-wide player rankings (`rankings`)
//!
//! Every analyzer is a pure function over `&[MatchRecord]`. Groupings
//! preserve first-seen order and every sort is stable, so ties always
//! resolve to the order in which a key first appeared in the input.

pub mod aggregate;
pub mod aliases;
pub mod compositions;
pub mod maps;
pub mod rankings;
pub mod team;

use std::collections::HashMap;
use std::hash::Hash;

pub use aggregate::{aggregate_players, aggregate_teams, analyze_match_stats, analyze_player_stats};
pub use aliases::{AliasError, AliasTable};
pub use compositions::analyze_game_stats;
pub use maps::MapNames;
pub use rankings::{rank_players, PopulationRankings, RankedEntry, RankingMetric};
pub use team::analyze_team;

use crate::models::CountEntry;

/// Squads placing at or above this count as a win.
pub const WIN_PLACEMENT_THRESHOLD: u32 = 3;

/// Tournament points for a squad placement.
///
/// 1→12, 2→9, 3→7, 4–5→5, 6–7→4, 8–10→3, 11–13→2, 14–20→1, anything else 0.
pub fn points_for(placement: u32) -> u32 {
    match placement {
        1 => 12,
        2 => 9,
        3 => 7,
        4..=5 => 5,
        6..=7 => 4,
        8..=10 => 3,
        11..=13 => 2,
        14..=20 => 1,
        _ => 0,
    }
}

/// Whether a placement counts as a win.
pub fn is_win(placement: u32) -> bool {
    placement <= WIN_PLACEMENT_THRESHOLD
}

/// Average of `total` over `count` samples (0 when empty).
pub fn calculate_average(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// `part / whole` in percent (0 when `whole` is 0).
pub fn calculate_percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Insertion-ordered grouping.
#[derive(Debug)]
pub(crate) struct Grouped<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Clone, V> Grouped<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Value for `key`, inserted with `init` on first sight.
    pub(crate) fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(key.clone(), idx);
                self.entries.push((key, init()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: Eq + Hash + Clone, V: Default> Grouped<K, V> {
    pub(crate) fn entry(&mut self, key: K) -> &mut V {
        self.get_or_insert_with(key, V::default)
    }
}

impl<K: Eq + Hash + Clone> Grouped<K, u32> {
    /// Counters as entries, highest count first (ties keep first-seen order).
    pub(crate) fn into_counts(self) -> Vec<CountEntry>
    where
        K: Into<String>,
    {
        let mut counts: Vec<CountEntry> = self
            .into_entries()
            .into_iter()
            .map(|(name, count)| CountEntry {
                name: name.into(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}
