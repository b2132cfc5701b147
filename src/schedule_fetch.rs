use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::America::New_York;
use serde::Deserialize;

use crate::http_client::http_client;
use crate::team_directory::TeamDirectory;

/// Away rows sort before home rows within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GameRole {
    Away = 0,
    Home = 1,
}

/// One team's slot in the day's schedule. `start_time` is Eastern local,
/// 12-hour with no leading zero ("7:05 PM"); `start_sort` is the same
/// instant as a sortable time-of-day.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    pub start_time: String,
    pub start_sort: NaiveTime,
    pub game_pk: u64,
    pub role: GameRole,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    entries: HashMap<String, ScheduleEntry>,
}

impl ScheduleIndex {
    pub fn get(&self, team_code: &str) -> Option<&ScheduleEntry> {
        self.entries.get(&team_code.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<Game>,
}

#[derive(Debug, Deserialize)]
struct Game {
    #[serde(rename = "gamePk")]
    game_pk: u64,
    #[serde(rename = "gameDate", default)]
    game_date: Option<String>,
    teams: GameTeams,
}

#[derive(Debug, Deserialize)]
struct GameTeams {
    away: GameSide,
    home: GameSide,
}

#[derive(Debug, Deserialize)]
struct GameSide {
    team: GameTeam,
}

#[derive(Debug, Deserialize)]
struct GameTeam {
    id: u32,
}

pub fn fetch_schedule(date: NaiveDate, directory: &TeamDirectory) -> Result<ScheduleIndex> {
    let client = http_client()?;
    let url = format!(
        "https://statsapi.mlb.com/api/v1/schedule?date={}&sportId=1",
        date.format("%Y-%m-%d")
    );
    let resp = client.get(&url).send().context("schedule request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading schedule body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_schedule_json(&body, directory)
}

pub fn parse_schedule_json(raw: &str, directory: &TeamDirectory) -> Result<ScheduleIndex> {
    let data: ScheduleResponse =
        serde_json::from_str(raw.trim()).context("invalid schedule json")?;

    let mut entries = HashMap::new();
    let games = data.dates.into_iter().next().map(|d| d.games).unwrap_or_default();
    for game in games {
        let Some(game_date) = game.game_date.as_deref() else {
            continue;
        };
        let Ok(utc) = DateTime::parse_from_rfc3339(game_date) else {
            log::warn!("unparsable gameDate {game_date} for game {}", game.game_pk);
            continue;
        };
        let local = utc.with_timezone(&New_York);
        let start_time = local.format("%-I:%M %p").to_string();
        let start_sort = local.time();

        for (side, role) in [
            (&game.teams.away, GameRole::Away),
            (&game.teams.home, GameRole::Home),
        ] {
            let Some(code) = directory.code_for(side.team.id) else {
                continue;
            };
            entries.insert(
                code.to_string(),
                ScheduleEntry {
                    start_time: start_time.clone(),
                    start_sort,
                    game_pk: game.game_pk,
                    role,
                },
            );
        }
    }

    Ok(ScheduleIndex { entries })
}
