//! Hero composition and pick analysis.
//!
//! A squad qualifies for composition analysis when its `team_id`
//! partition within a match holds exactly three player records. Team
//! names are not used for grouping here because two squads in one lobby
//! can share a display name.

use tracing::debug;

use super::maps::MapNames;
use super::{is_win, Grouped};
use crate::models::{
    CompositionKey, CompositionStats, GameStats, HeroStats, MapCompositions, MatchRecord,
    PlayerRecord, WinLoss,
};

/// Minimum games for a composition to appear in the lobby-wide table.
pub const MIN_COMPOSITION_GAMES: u32 = 2;

/// Number of bans listed in `most_frequent_bans`.
pub const TOP_BANS: usize = 5;

/// Rows in the most popular / most losing composition views.
pub const TOP_COMPOSITION_VIEWS: usize = 5;

/// A qualifying squad of one match.
struct Squad {
    key: CompositionKey,
    placement: u32,
}

/// Split a match by `team_id` and keep the three-player squads.
fn qualifying_squads(m: &MatchRecord) -> Vec<Squad> {
    let mut by_team: Grouped<&str, Vec<&PlayerRecord>> = Grouped::new();
    for player in &m.players {
        by_team.entry(player.team_id.as_str()).push(player);
    }

    by_team
        .into_entries()
        .into_iter()
        .filter_map(|(_, members)| {
            let placement = members.first()?.placement;
            let key = CompositionKey::from_heroes(members.iter().map(|p| p.hero.as_str()))?;
            Some(Squad { key, placement })
        })
        .collect()
}

/// Lobby-wide bans, picks, maps and composition win rates.
pub fn analyze_game_stats(matches: &[MatchRecord], maps: &MapNames) -> GameStats {
    debug!("Analyzing compositions over {} matches", matches.len());

    let mut bans: Grouped<String, u32> = Grouped::new();
    let mut picks: Grouped<String, u32> = Grouped::new();
    let mut map_plays: Grouped<String, u32> = Grouped::new();
    let mut compositions: Grouped<CompositionKey, WinLoss> = Grouped::new();
    let mut by_map: Grouped<String, Grouped<CompositionKey, WinLoss>> = Grouped::new();
    let mut hero_records: Grouped<String, WinLoss> = Grouped::new();

    for m in matches {
        if !m.ban.is_empty() {
            *bans.entry(m.ban.clone()) += 1;
        }

        let map = maps.display_name(&m.map_code).to_string();
        *map_plays.entry(map.clone()) += 1;
        let map_compositions = by_map.get_or_insert_with(map, Grouped::new);

        for player in &m.players {
            *picks.entry(player.hero.clone()) += 1;
        }

        for squad in qualifying_squads(m) {
            let win = is_win(squad.placement);
            compositions.entry(squad.key.clone()).record(win);
            map_compositions.entry(squad.key.clone()).record(win);
            for hero in squad.key.heroes() {
                hero_records.entry(hero.clone()).record(win);
            }
        }
    }

    let mut surfaced: Vec<CompositionStats> = compositions
        .into_entries()
        .into_iter()
        .map(|(key, record)| CompositionStats::new(key, record))
        .filter(|c| c.total_games >= MIN_COMPOSITION_GAMES)
        .collect();
    sort_by_win_rate(&mut surfaced);

    let mut most_popular = surfaced.clone();
    most_popular.sort_by(|a, b| b.total_games.cmp(&a.total_games));
    most_popular.truncate(TOP_COMPOSITION_VIEWS);

    let mut most_losing = surfaced.clone();
    most_losing.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));
    most_losing.truncate(TOP_COMPOSITION_VIEWS);

    let compositions_by_map: Vec<MapCompositions> = by_map
        .into_entries()
        .into_iter()
        .map(|(map, table)| {
            let mut list: Vec<CompositionStats> = table
                .into_entries()
                .into_iter()
                .map(|(key, record)| CompositionStats::new(key, record))
                .collect();
            sort_by_win_rate(&mut list);
            MapCompositions {
                map,
                compositions: list,
            }
        })
        .collect();

    let hero_picks = picks.into_counts();
    let heroes: Vec<HeroStats> = hero_picks
        .iter()
        .map(|pick| {
            let record = hero_records.get(&pick.name).copied().unwrap_or_default();
            HeroStats::new(pick.name.clone(), pick.count, record)
        })
        .collect();

    let bans = bans.into_counts();
    let most_frequent_bans = bans.iter().take(TOP_BANS).map(|b| b.name.clone()).collect();

    GameStats {
        total_maps: matches.len() as u32,
        bans,
        most_frequent_bans,
        hero_picks,
        map_plays: map_plays.into_counts(),
        compositions: surfaced,
        most_popular_compositions: most_popular,
        most_losing_compositions: most_losing,
        compositions_by_map,
        heroes,
    }
}

/// Win rate descending, then games played descending.
fn sort_by_win_rate(list: &mut [CompositionStats]) {
    list.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.total_games.cmp(&a.total_games))
    });
}
