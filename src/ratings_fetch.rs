use anyhow::{Context, Result};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::http_client::http_client;

const RATINGS_URL: &str = "https://www.espn.com/fantasy/baseball/story/_/id/31165089/\
fantasy-baseball-forecaster-team-hitting-stolen-base-ratings-platoon-matchups-daily-weekly-leagues";
const RATINGS_ARTICLE_ID: &str = "31165089";

// Columns the report never carries.
const DROPPED_COLUMNS: &[&str] = &["SB", "OVERALL", "DATE"];

/// One ratings-table row for the target date. `extras` carries any scraped
/// columns beyond the named ones, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRating {
    pub team: String,
    pub opp: String,
    pub lhb: f64,
    pub rhb: f64,
    pub extras: Vec<(String, String)>,
}

/// The per-date column header used to pick today's values out of each cell,
/// e.g. "Sat, 8/30".
pub fn display_label(date: NaiveDate) -> String {
    date.format("%a, %-m/%-d").to_string()
}

pub fn fetch_ratings(date: NaiveDate) -> Result<Vec<TeamRating>> {
    let client = http_client()?;
    let resp = client
        .get(RATINGS_URL)
        .send()
        .context("ratings request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading ratings body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_ratings_html(&body, &display_label(date))
}

/// Scrapes the forecaster table. Each data cell holds one `<div>` per date;
/// the div index matching `label` in the date column selects the values for
/// the target day. Rows without that label are skipped.
pub fn parse_ratings_html(html: &str, label: &str) -> Result<Vec<TeamRating>> {
    let document = Html::parse_document(html);
    let article_selector =
        Selector::parse(&format!("article[data-id=\"{RATINGS_ARTICLE_ID}\"]")).unwrap();
    let table_selector = Selector::parse("table.inline-table").unwrap();
    let th_selector = Selector::parse("thead th").unwrap();
    let tr_selector = Selector::parse("tbody tr").unwrap();
    let td_selector = Selector::parse("td").unwrap();
    let div_selector = Selector::parse("div").unwrap();

    let article = document
        .select(&article_selector)
        .next()
        .context("ratings article not found")?;
    let table = article
        .select(&table_selector)
        .next()
        .context("ratings table not found")?;

    let columns: Vec<String> = table
        .select(&th_selector)
        .map(|th| cell_text(&th))
        .collect();
    if columns.is_empty() {
        return Err(anyhow::anyhow!("ratings table has no header row"));
    }

    let mut rows = Vec::new();
    for tr in table.select(&tr_selector) {
        let tds: Vec<ElementRef> = tr.select(&td_selector).collect();
        if tds.len() < 2 {
            continue;
        }
        let Some(date_idx) = tds[1]
            .select(&div_selector)
            .position(|div| cell_text(&div) == label)
        else {
            continue;
        };

        let mut rating = TeamRating::default();
        for (name, td) in columns.iter().zip(tds.iter()) {
            if name == "TEAM" {
                rating.team = team_code(td);
                continue;
            }
            let divs: Vec<ElementRef> = td.select(&div_selector).collect();
            let value = match divs.get(date_idx) {
                Some(div) => cell_text(div),
                None => cell_text(td),
            };
            match name.as_str() {
                "OPP" => rating.opp = value,
                "LHB" => rating.lhb = parse_rating(&value),
                "RHB" => rating.rhb = parse_rating(&value),
                _ if DROPPED_COLUMNS.contains(&name.as_str()) => {}
                _ => rating.extras.push((name.clone(), value)),
            }
        }
        if !rating.team.is_empty() {
            rows.push(rating);
        }
    }

    Ok(rows)
}

/// Malformed or missing ratings read as 0 and simply fail the favorable
/// threshold downstream.
pub fn parse_rating(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

fn cell_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn team_code(td: &ElementRef) -> String {
    let img_selector = Selector::parse("img").unwrap();
    let code = td
        .select(&img_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| src.rsplit('/').next())
        .and_then(|file| file.split('.').next())
        .map(|stem| stem.to_uppercase())
        .unwrap_or_else(|| cell_text(td));
    // The logo file for the White Sox still uses the old code.
    if code == "CHW" {
        "CWS".to_string()
    } else {
        code
    }
}
