use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::report::{game_groups, BestRow, ReportRow};

const BORDER_GRAY: Color = Color::RGB(0xA9A9A9);

struct RatingPalette {
    very_cold: Format,
    cold: Format,
    hot: Format,
    very_hot: Format,
    off: Format,
    plain: Format,
}

impl RatingPalette {
    fn new() -> Self {
        let base = || {
            Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(BORDER_GRAY)
        };
        Self {
            very_cold: base()
                .set_background_color(Color::RGB(0x05AEF0))
                .set_font_color(Color::White),
            cold: base().set_background_color(Color::RGB(0xBCDEEE)),
            hot: base().set_background_color(Color::RGB(0xEE9880)),
            very_hot: base()
                .set_background_color(Color::RGB(0xF50D1F))
                .set_font_color(Color::White),
            off: base().set_background_color(BORDER_GRAY),
            plain: base(),
        }
    }

    /// Colour bands from the source report: 1 and 10 get the saturated
    /// ends, 2-3 and 8-9 the pale ones, OFF days are grayed out.
    fn for_rating(&self, value: f64, opp: &str) -> &Format {
        if opp == "OFF" {
            &self.off
        } else if value == 1.0 {
            &self.very_cold
        } else if (2.0..=3.0).contains(&value) {
            &self.cold
        } else if (8.0..=9.0).contains(&value) {
            &self.hot
        } else if value == 10.0 {
            &self.very_hot
        } else {
            &self.plain
        }
    }
}

fn full_table_columns(rows: &[ReportRow]) -> Vec<String> {
    let mut columns = vec![
        "StartTime".to_string(),
        "TEAM".to_string(),
        "OPP".to_string(),
        "LHB".to_string(),
        "RHB".to_string(),
    ];
    if let Some(row) = rows.first() {
        columns.extend(row.rating.extras.iter().map(|(name, _)| name.clone()));
    }
    columns
}

fn best_table_columns(best: &[BestRow]) -> Vec<String> {
    let mut columns = vec![
        "TEAM".to_string(),
        "OPP".to_string(),
        "LHB".to_string(),
        "RHB".to_string(),
    ];
    if let Some(row) = best.first() {
        columns.extend(row.rating.extras.iter().map(|(name, _)| name.clone()));
    }
    columns.extend(["LH_Batters".to_string(), "RH_Batters".to_string(), "Switch".to_string()]);
    columns
}

pub fn write_workbook(
    path: &Path,
    date: NaiveDate,
    rows: &[ReportRow],
    best: &[BestRow],
) -> Result<()> {
    let display_date = date.format("%B %d, %Y").to_string();
    let mut workbook = Workbook::new();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Matchups")?;
        write_matchups_sheet(sheet, &display_date, rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("BestMatchups")?;
        write_best_sheet(sheet, &display_date, best)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_matchups_sheet(sheet: &mut Worksheet, display_date: &str, rows: &[ReportRow]) -> Result<()> {
    let palette = RatingPalette::new();
    let header = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_bold();
    let merged = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    let merged_teams = merged.clone().set_text_wrap();

    let columns = full_table_columns(rows);
    sheet.merge_range(0, 0, 0, 4, &format!("Data for {display_date}"), &header)?;
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(1, col as u16, name, &header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 2;
        sheet.write_string_with_format(r, 0, &row.start_time, &palette.plain)?;
        sheet.write_string_with_format(r, 1, &row.rating.team, &palette.plain)?;
        sheet.write_string_with_format(r, 2, &row.rating.opp, &palette.plain)?;
        sheet.write_number_with_format(
            r,
            3,
            row.rating.lhb,
            palette.for_rating(row.rating.lhb, &row.rating.opp),
        )?;
        sheet.write_number_with_format(
            r,
            4,
            row.rating.rhb,
            palette.for_rating(row.rating.rhb, &row.rating.opp),
        )?;
        for (offset, (_, value)) in row.rating.extras.iter().enumerate() {
            sheet.write_string_with_format(r, 5 + offset as u16, value, &palette.plain)?;
        }
    }

    // Merge the paired away/home rows: one start-time cell and one
    // "AWAY\n@ HOME" cell spanning both rows.
    for group in game_groups(rows) {
        if group.len() < 2 {
            continue;
        }
        let first = group[0] as u32 + 2;
        let last = *group.last().unwrap_or(&group[0]) as u32 + 2;
        let away = &rows[group[0]];
        let home = &rows[group[1]];
        sheet.merge_range(first, 0, last, 0, &away.start_time, &merged)?;
        let pairing = format!("{}\n@ {}", away.rating.team, home.rating.team);
        sheet.merge_range(first, 1, last, 2, &pairing, &merged_teams)?;
    }

    // Teams with no game sit in one gray block at the bottom.
    let idle: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.start_time.is_empty())
        .map(|(idx, _)| idx)
        .collect();
    if idle.len() > 1 {
        let first = idle[0] as u32 + 2;
        let last = idle[idle.len() - 1] as u32 + 2;
        sheet.merge_range(first, 0, last, 0, "", &palette.off)?;
    }

    sheet.set_freeze_panes(2, 0)?;
    set_column_widths(sheet, &columns, rows.len(), |idx, col| match col {
        0 => Some(rows[idx].start_time.len()),
        1 => Some(rows[idx].rating.team.len()),
        2 => Some(rows[idx].rating.opp.len()),
        3 | 4 => Some(4),
        _ => rows[idx]
            .rating
            .extras
            .get(col - 5)
            .map(|(_, value)| value.len()),
    })?;
    Ok(())
}

fn write_best_sheet(sheet: &mut Worksheet, display_date: &str, best: &[BestRow]) -> Result<()> {
    let palette = RatingPalette::new();
    let header = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_bold();
    let wrap = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(BORDER_GRAY)
        .set_text_wrap();

    let columns = best_table_columns(best);
    let last_col = columns.len().saturating_sub(1) as u16;
    sheet.merge_range(
        0,
        0,
        0,
        last_col,
        &format!("Best Hitter/Pitcher Matchups for {display_date}"),
        &header,
    )?;
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(1, col as u16, name, &header)?;
    }

    let batter_cols = columns.len() - 3;
    for (idx, row) in best.iter().enumerate() {
        let r = idx as u32 + 2;
        sheet.write_string_with_format(r, 0, &row.rating.team, &palette.plain)?;
        sheet.write_string_with_format(r, 1, &row.rating.opp, &palette.plain)?;
        sheet.write_number_with_format(
            r,
            2,
            row.rating.lhb,
            palette.for_rating(row.rating.lhb, &row.rating.opp),
        )?;
        sheet.write_number_with_format(
            r,
            3,
            row.rating.rhb,
            palette.for_rating(row.rating.rhb, &row.rating.opp),
        )?;
        for (offset, (_, value)) in row.rating.extras.iter().enumerate() {
            sheet.write_string_with_format(r, 4 + offset as u16, value, &palette.plain)?;
        }
        sheet.write_string_with_format(r, batter_cols as u16, &row.lh_batters, &wrap)?;
        sheet.write_string_with_format(r, batter_cols as u16 + 1, &row.rh_batters, &wrap)?;
        sheet.write_string_with_format(r, batter_cols as u16 + 2, &row.switch, &wrap)?;
    }

    sheet.set_freeze_panes(2, 0)?;
    set_column_widths(sheet, &columns, best.len(), |idx, col| {
        let row = &best[idx];
        match col {
            0 => Some(row.rating.team.len()),
            1 => Some(row.rating.opp.len()),
            2 | 3 => Some(4),
            c if c >= batter_cols => {
                let text = match c - batter_cols {
                    0 => &row.lh_batters,
                    1 => &row.rh_batters,
                    _ => &row.switch,
                };
                text.split('\n').map(str::len).max()
            }
            c => row.rating.extras.get(c - 4).map(|(_, value)| value.len()),
        }
    })?;
    Ok(())
}

/// Sizes each column to its longest cell line plus a little padding, the
/// same way the source report autosized.
fn set_column_widths(
    sheet: &mut Worksheet,
    columns: &[String],
    row_count: usize,
    cell_len: impl Fn(usize, usize) -> Option<usize>,
) -> Result<()> {
    for (col, name) in columns.iter().enumerate() {
        let mut width = name.len();
        for idx in 0..row_count {
            if let Some(len) = cell_len(idx, col) {
                width = width.max(len);
            }
        }
        sheet.set_column_width(col as u16, (width + 2) as f64)?;
    }
    Ok(())
}
