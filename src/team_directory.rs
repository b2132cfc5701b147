use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::http_client::http_client;

const STATSAPI_TEAMS_URL: &str = "https://statsapi.mlb.com/api/v1/teams?sportId=1";

// The ratings page uses a different code than statsapi for these two clubs.
// Left side is the ratings-page code, right side is the statsapi abbreviation.
const CODE_ALIASES: &[(&str, &str)] = &[("ARI", "AZ"), ("WAS", "WSH")];

/// Canonical team-code -> numeric id map for the day, with alias entries
/// layered on so ratings-page codes resolve too.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    ids: HashMap<String, u32>,
    codes: HashMap<u32, String>,
}

impl TeamDirectory {
    pub fn resolve(&self, code: &str) -> Option<u32> {
        self.ids.get(&code.to_uppercase()).copied()
    }

    /// Reverse lookup, preferring the ratings-page code where an alias
    /// exists so schedule rows join against the ratings table.
    pub fn code_for(&self, id: u32) -> Option<&str> {
        self.codes.get(&id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    id: u32,
    abbreviation: String,
}

pub fn fetch_team_directory() -> Result<TeamDirectory> {
    let client = http_client()?;
    let resp = client
        .get(STATSAPI_TEAMS_URL)
        .send()
        .context("teams request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading teams body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_team_directory_json(&body)
}

pub fn parse_team_directory_json(raw: &str) -> Result<TeamDirectory> {
    let data: TeamsResponse = serde_json::from_str(raw.trim()).context("invalid teams json")?;

    let mut ids = HashMap::new();
    let mut codes = HashMap::new();
    for team in data.teams {
        let code = team.abbreviation.to_uppercase();
        ids.insert(code.clone(), team.id);
        codes.insert(team.id, code);
    }
    for (ratings_code, statsapi_code) in CODE_ALIASES {
        if let Some(id) = ids.get(*statsapi_code).copied() {
            ids.insert((*ratings_code).to_string(), id);
            codes.insert(id, (*ratings_code).to_string());
        }
    }

    Ok(TeamDirectory { ids, codes })
}
