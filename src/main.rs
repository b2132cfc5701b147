use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;

use platoon_matchups::categorize::categorize;
use platoon_matchups::export::write_workbook;
use platoon_matchups::positions::{annotate_group, fetch_positions};
use platoon_matchups::ratings_fetch::fetch_ratings;
use platoon_matchups::report::{assemble, select_best, BestRow};
use platoon_matchups::schedule_fetch::fetch_schedule;
use platoon_matchups::team_directory::fetch_team_directory;

/// Generates the daily platoon matchup spreadsheet: every team's pitcher
/// matchup ratings ordered by game time, plus the favorable-matchup teams
/// with their qualifying batters.
#[derive(Parser)]
#[command(name = "platoon_matchups")]
struct Cli {
    /// Target date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Output workbook path, defaults to pitcher_matchups_<date>.xlsx
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let out = cli
        .out
        .unwrap_or_else(|| PathBuf::from(format!("pitcher_matchups_{}.xlsx", date.format("%Y-%m-%d"))));

    let directory = fetch_team_directory()?;
    if directory.is_empty() {
        return Err(anyhow::anyhow!("team directory came back empty"));
    }
    log::info!("team directory loaded");

    let ratings = fetch_ratings(date)?;
    if ratings.is_empty() {
        return Err(anyhow::anyhow!(
            "no ratings rows for {}; is the date on the forecaster page?",
            date.format("%Y-%m-%d")
        ));
    }
    log::info!("scraped {} ratings rows", ratings.len());

    let schedule = fetch_schedule(date, &directory)?;
    log::info!("schedule covers {} team slots", schedule.len());

    let rows = assemble(ratings, &schedule);
    let best_rows = select_best(&rows);
    log::info!("{} teams meet the favorable threshold", best_rows.len());

    let season = date.year();
    let mut groups = Vec::with_capacity(best_rows.len());
    for row in &best_rows {
        let g = categorize(&directory, &row.rating, season)?;
        log::debug!(
            "{}: {} lh / {} rh / {} switch",
            row.rating.team,
            g.lh_ids.len(),
            g.rh_ids.len(),
            g.sw_ids.len()
        );
        groups.push(g);
    }

    let all_ids: BTreeSet<u64> = groups
        .iter()
        .flat_map(|g| {
            g.lh_ids
                .iter()
                .chain(g.rh_ids.iter())
                .chain(g.sw_ids.iter())
                .copied()
        })
        .collect();
    let positions = fetch_positions(&all_ids.iter().copied().collect::<Vec<_>>())?;
    log::info!("resolved positions for {} of {} batters", positions.len(), all_ids.len());

    let best: Vec<BestRow> = best_rows
        .iter()
        .zip(groups.iter())
        .map(|(row, g)| BestRow {
            rating: row.rating.clone(),
            lh_batters: annotate_group(&g.lh_text, &g.lh_ids, &positions),
            rh_batters: annotate_group(&g.rh_text, &g.rh_ids, &positions),
            switch: annotate_group(&g.sw_text, &g.sw_ids, &positions),
        })
        .collect();

    write_workbook(&out, date, &rows, &best)?;
    log::info!("wrote {} full rows and {} best rows to {}", rows.len(), best.len(), out.display());
    Ok(())
}
