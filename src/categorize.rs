use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::ratings_fetch::TeamRating;
use crate::roster_fetch::{side_batters, Batter, Side};
use crate::team_directory::TeamDirectory;

/// Rating at or above which a side's batter list is considered favorable.
pub const FAVORABLE_RATING: f64 = 8.0;

/// Per-team batter partition. Ids are always populated; the text fields are
/// gated by the rating threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupGroups {
    pub lh_text: String,
    pub rh_text: String,
    pub sw_text: String,
    pub lh_ids: Vec<u64>,
    pub rh_ids: Vec<u64>,
    pub sw_ids: Vec<u64>,
}

/// Fetches both side lists for the rated team and partitions them. Roster
/// fetch failures degrade to empty groups for this team only.
pub fn categorize(
    directory: &TeamDirectory,
    rating: &TeamRating,
    season: i32,
) -> Result<MatchupGroups> {
    let left = match side_batters(directory, &rating.team, Side::Left, season) {
        Ok(batters) => batters,
        Err(err) => {
            log::warn!("left-side roster fetch failed for {}: {err:#}", rating.team);
            Vec::new()
        }
    };
    let right = match side_batters(directory, &rating.team, Side::Right, season) {
        Ok(batters) => batters,
        Err(err) => {
            log::warn!("right-side roster fetch failed for {}: {err:#}", rating.team);
            Vec::new()
        }
    };
    Ok(partition_batters(&left, &right, rating.lhb, rating.rhb))
}

/// Splits the two overlapping side queries into exclusive left / right /
/// switch groups. A player returned by both queries is structurally a
/// switch hitter; the non-switch codes are mutually exclusive upstream.
pub fn partition_batters(left: &[Batter], right: &[Batter], lhb: f64, rhb: f64) -> MatchupGroups {
    let left_ids: HashSet<u64> = left.iter().map(|b| b.id).collect();
    let right_ids: HashSet<u64> = right.iter().map(|b| b.id).collect();
    let switch_ids: HashSet<u64> = left_ids.intersection(&right_ids).copied().collect();

    // One name per switch id, first source list wins.
    let mut switch_names: HashMap<u64, &str> = HashMap::new();
    for batter in left.iter().chain(right.iter()) {
        if switch_ids.contains(&batter.id) {
            switch_names.entry(batter.id).or_insert(&batter.name);
        }
    }
    let mut switch: Vec<(&str, u64)> = switch_names
        .iter()
        .map(|(id, name)| (*name, *id))
        .collect();
    switch.sort();

    let lh: Vec<&Batter> = left.iter().filter(|b| !switch_ids.contains(&b.id)).collect();
    let rh: Vec<&Batter> = right.iter().filter(|b| !switch_ids.contains(&b.id)).collect();

    let joined = |batters: &[&Batter]| {
        batters
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    MatchupGroups {
        lh_text: if lhb >= FAVORABLE_RATING { joined(&lh) } else { String::new() },
        rh_text: if rhb >= FAVORABLE_RATING { joined(&rh) } else { String::new() },
        sw_text: if lhb >= FAVORABLE_RATING || rhb >= FAVORABLE_RATING {
            switch
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            String::new()
        },
        lh_ids: lh.iter().map(|b| b.id).collect(),
        rh_ids: rh.iter().map(|b| b.id).collect(),
        sw_ids: switch.iter().map(|(_, id)| *id).collect(),
    }
}
