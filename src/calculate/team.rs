//! Single-team performance analysis.

use tracing::debug;

use super::maps::MapNames;
use super::{calculate_average, points_for, Grouped};
use crate::models::{
    CompositionKey, CompositionPerformance, HeroPerformance, MatchRecord, PlacementPerformance,
    TeamPerformance,
};

/// Placement series, picks and per-composition/per-hero placement
/// records of the team named exactly `team_name`.
pub fn analyze_team(matches: &[MatchRecord], team_name: &str, maps: &MapNames) -> TeamPerformance {
    let mut placements: Vec<u32> = Vec::new();
    let mut hero_picks: Grouped<String, u32> = Grouped::new();
    let mut map_plays: Grouped<String, u32> = Grouped::new();
    let mut by_composition: Grouped<CompositionKey, Vec<u32>> = Grouped::new();
    let mut by_hero: Grouped<String, Vec<u32>> = Grouped::new();

    for m in matches {
        let roster: Vec<_> = m.team_players(team_name).collect();
        // Squad members share a placement; take the first.
        let Some(placement) = roster.first().map(|p| p.placement) else {
            continue;
        };

        placements.push(placement);
        *map_plays.entry(maps.display_name(&m.map_code).to_string()) += 1;

        if let Some(key) = CompositionKey::from_heroes(roster.iter().map(|p| p.hero.as_str())) {
            by_composition.entry(key).push(placement);
        }

        for player in &roster {
            *hero_picks.entry(player.hero.clone()) += 1;
            by_hero.entry(player.hero.clone()).push(placement);
        }
    }

    debug!(
        "Team '{}' played {} of {} matches",
        team_name,
        placements.len(),
        matches.len()
    );

    let points: Vec<u32> = placements.iter().map(|&p| points_for(p)).collect();
    let placement_total: u64 = placements.iter().map(|&p| p as u64).sum();
    let points_total: u64 = points.iter().map(|&p| p as u64).sum();

    let mut compositions: Vec<CompositionPerformance> = by_composition
        .into_entries()
        .into_iter()
        .map(|(heroes, series)| CompositionPerformance {
            heroes,
            performance: PlacementPerformance::from_placements(&series),
        })
        .collect();
    compositions.sort_by(|a, b| {
        a.performance
            .avg_placement
            .total_cmp(&b.performance.avg_placement)
    });

    let mut heroes: Vec<HeroPerformance> = by_hero
        .into_entries()
        .into_iter()
        .map(|(hero, series)| HeroPerformance {
            hero,
            performance: PlacementPerformance::from_placements(&series),
        })
        .collect();
    heroes.sort_by(|a, b| {
        a.performance
            .avg_placement
            .total_cmp(&b.performance.avg_placement)
    });

    TeamPerformance {
        team_name: team_name.to_string(),
        total_matches: placements.len() as u32,
        avg_placement: calculate_average(placement_total, placements.len()),
        avg_points_per_game: calculate_average(points_total, points.len()),
        max_points: points.iter().copied().max().unwrap_or(0),
        min_points: points.iter().copied().min().unwrap_or(0),
        placements,
        points,
        hero_picks: hero_picks.into_counts(),
        map_plays: map_plays.into_counts(),
        compositions,
        heroes,
    }
}
