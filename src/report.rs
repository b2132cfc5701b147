use chrono::NaiveTime;

use crate::categorize::FAVORABLE_RATING;
use crate::ratings_fetch::TeamRating;
use crate::schedule_fetch::{GameRole, ScheduleIndex};

/// One line of the full matchup table: ratings row joined with the team's
/// schedule slot. A team with no game keeps an empty start time and sorts
/// after every scheduled team.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub start_time: String,
    pub rating: TeamRating,
    pub game_pk: Option<u64>,
    start_sort: Option<NaiveTime>,
    role: Option<GameRole>,
}

/// A best-matchups line: the rating columns plus the three annotated
/// batter-group texts, in full-table order.
#[derive(Debug, Clone)]
pub struct BestRow {
    pub rating: TeamRating,
    pub lh_batters: String,
    pub rh_batters: String,
    pub switch: String,
}

/// Joins ratings rows with the schedule and orders them by start time, then
/// game, then away-before-home. The sort is stable, so equal keys keep the
/// ratings-table order.
pub fn assemble(ratings: Vec<TeamRating>, schedule: &ScheduleIndex) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = ratings
        .into_iter()
        .map(|rating| match schedule.get(&rating.team) {
            Some(entry) => ReportRow {
                start_time: entry.start_time.clone(),
                game_pk: Some(entry.game_pk),
                start_sort: Some(entry.start_sort),
                role: Some(entry.role),
                rating,
            },
            None => ReportRow {
                start_time: String::new(),
                game_pk: None,
                start_sort: None,
                role: None,
                rating,
            },
        })
        .collect();

    rows.sort_by_key(|row| {
        (
            row.start_sort.is_none(),
            row.start_sort,
            row.game_pk,
            row.role,
        )
    });
    rows
}

pub fn is_best_matchup(rating: &TeamRating) -> bool {
    rating.lhb >= FAVORABLE_RATING || rating.rhb >= FAVORABLE_RATING
}

/// Full-table rows meeting the favorable threshold on either side, order
/// preserved. Batter texts are attached by the caller once rosters and
/// positions are in.
pub fn select_best(rows: &[ReportRow]) -> Vec<&ReportRow> {
    rows.iter().filter(|row| is_best_matchup(&row.rating)).collect()
}

/// Runs of consecutive rows sharing a game id, as row indexes. Two-element
/// groups are the paired away/home rows the renderer merges.
pub fn game_groups(rows: &[ReportRow]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        match groups.last_mut() {
            Some(group)
                if row.game_pk.is_some()
                    && group.last().map(|last| rows[*last].game_pk) == Some(row.game_pk) =>
            {
                group.push(idx);
            }
            _ => groups.push(vec![idx]),
        }
    }
    groups
}
