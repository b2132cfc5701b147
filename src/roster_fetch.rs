use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::http_client::http_client;
use crate::team_directory::TeamDirectory;

/// Batting-side query. A switch hitter satisfies both queries, so the same
/// player can come back from `Left` and `Right`; the categorizer resolves
/// that overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn matches(self, bat_side_code: &str) -> bool {
        match self {
            Side::Left => matches!(bat_side_code, "L" | "S"),
            Side::Right => matches!(bat_side_code, "R" | "S"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batter {
    pub name: String,
    pub id: u64,
}

#[derive(Debug, Deserialize)]
struct RosterResponse {
    #[serde(default)]
    roster: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RosterEntry {
    person: RosterPerson,
    #[serde(default)]
    position: Option<RosterPosition>,
}

#[derive(Debug, Deserialize)]
struct RosterPerson {
    id: u64,
}

#[derive(Debug, Deserialize, Default)]
struct RosterPosition {
    #[serde(rename = "type", default)]
    position_type: String,
}

#[derive(Debug, Deserialize)]
struct PeopleResponse {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct Person {
    id: u64,
    #[serde(rename = "fullName", default)]
    full_name: String,
    #[serde(rename = "batSide", default)]
    bat_side: Option<BatSide>,
}

#[derive(Debug, Deserialize, Default)]
struct BatSide {
    #[serde(default)]
    code: String,
}

/// Batters on the team's active roster matching the requested side, deduped
/// by (name, id) and sorted by name. Unknown team code, empty roster and
/// missing ids all degrade to an empty list.
pub fn side_batters(
    directory: &TeamDirectory,
    team_code: &str,
    side: Side,
    season: i32,
) -> Result<Vec<Batter>> {
    let Some(team_id) = directory.resolve(team_code) else {
        return Ok(Vec::new());
    };

    let client = http_client()?;
    let url = format!(
        "https://statsapi.mlb.com/api/v1/teams/{team_id}/roster?rosterType=active&season={season}"
    );
    let resp = client.get(&url).send().context("roster request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading roster body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }

    let ids = parse_roster_batter_ids(&body)?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let url = format!("https://statsapi.mlb.com/api/v1/people?personIds={joined}");
    let resp = client.get(&url).send().context("people request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading people body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }

    Ok(select_side(&parse_people_json(&body)?, side))
}

/// Person ids on the roster whose position type is not "Pitcher".
pub fn parse_roster_batter_ids(raw: &str) -> Result<Vec<u64>> {
    let data: RosterResponse = serde_json::from_str(raw.trim()).context("invalid roster json")?;
    Ok(data
        .roster
        .into_iter()
        .filter(|entry| {
            entry
                .position
                .as_ref()
                .map(|p| p.position_type != "Pitcher")
                .unwrap_or(true)
        })
        .map(|entry| entry.person.id)
        .collect())
}

#[derive(Debug, Clone)]
pub struct PersonSide {
    pub id: u64,
    pub name: String,
    pub bat_side: String,
}

pub fn parse_people_json(raw: &str) -> Result<Vec<PersonSide>> {
    let data: PeopleResponse = serde_json::from_str(raw.trim()).context("invalid people json")?;
    Ok(data
        .people
        .into_iter()
        .map(|p| PersonSide {
            id: p.id,
            name: p.full_name,
            bat_side: p.bat_side.unwrap_or_default().code.to_uppercase(),
        })
        .collect())
}

pub fn select_side(people: &[PersonSide], side: Side) -> Vec<Batter> {
    let deduped: BTreeSet<(String, u64)> = people
        .iter()
        .filter(|p| side.matches(&p.bat_side))
        .map(|p| (p.name.clone(), p.id))
        .collect();
    deduped
        .into_iter()
        .map(|(name, id)| Batter { name, id })
        .collect()
}
