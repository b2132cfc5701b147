use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::http_client::http_client;

#[derive(Debug, Deserialize)]
struct PeopleResponse {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct Person {
    id: u64,
    #[serde(rename = "primaryPosition", default)]
    primary_position: Option<Position>,
}

#[derive(Debug, Deserialize, Default)]
struct Position {
    #[serde(default)]
    abbreviation: String,
}

/// Bulk primary-position lookup. The whole best-matchups table depends on
/// this one call, so a failure here aborts the run.
pub fn fetch_positions(ids: &[u64]) -> Result<HashMap<u64, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let url =
        format!("https://statsapi.mlb.com/api/v1/people?personIds={joined}&hydrate=position");
    let client = http_client()?;
    let resp = client.get(&url).send().context("positions request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading positions body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_positions_json(&body)
}

pub fn parse_positions_json(raw: &str) -> Result<HashMap<u64, String>> {
    let data: PeopleResponse =
        serde_json::from_str(raw.trim()).context("invalid positions json")?;
    Ok(data
        .people
        .into_iter()
        .filter_map(|p| p.primary_position.map(|pos| (p.id, pos.abbreviation)))
        .collect())
}

/// Renders one "Name (POS)" line per batter, preserving input order. An id
/// with no resolved position renders empty parentheses; empty names are
/// dropped. Name/id counts must line up.
pub fn annotate(names: &[&str], ids: &[u64], positions: &HashMap<u64, String>) -> String {
    debug_assert_eq!(names.len(), ids.len(), "name/id list length mismatch");
    names
        .iter()
        .zip(ids.iter())
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, id)| {
            let pos = positions.get(id).map(String::as_str).unwrap_or("");
            format!("{name} ({pos})")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convenience over the newline-joined group text the categorizer emits.
pub fn annotate_group(text: &str, ids: &[u64], positions: &HashMap<u64, String>) -> String {
    if text.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = text.split('\n').collect();
    annotate(&names, ids, positions)
}
