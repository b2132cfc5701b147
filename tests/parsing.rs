use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use platoon_matchups::positions::{annotate, annotate_group, parse_positions_json};
use platoon_matchups::roster_fetch::{
    parse_people_json, parse_roster_batter_ids, select_side, Side,
};
use platoon_matchups::team_directory::parse_team_directory_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn team_directory_resolves_codes_and_aliases() {
    let directory =
        parse_team_directory_json(&read_fixture("teams.json")).expect("fixture should parse");
    assert_eq!(directory.resolve("NYY"), Some(147));
    assert_eq!(directory.resolve("nyy"), Some(147));

    // Ratings-page codes resolve through the alias layer to the same id.
    assert_eq!(directory.resolve("ARI"), directory.resolve("AZ"));
    assert_eq!(directory.resolve("ARI"), Some(109));
    assert_eq!(directory.resolve("WAS"), Some(120));
}

#[test]
fn unknown_team_code_is_none() {
    let directory =
        parse_team_directory_json(&read_fixture("teams.json")).expect("fixture should parse");
    assert_eq!(directory.resolve("XYZ"), None);
}

#[test]
fn reverse_lookup_prefers_ratings_code() {
    let directory =
        parse_team_directory_json(&read_fixture("teams.json")).expect("fixture should parse");
    // Schedule rows join against the ratings table, which says ARI, not AZ.
    assert_eq!(directory.code_for(109), Some("ARI"));
    assert_eq!(directory.code_for(120), Some("WAS"));
    assert_eq!(directory.code_for(147), Some("NYY"));
}

#[test]
fn roster_excludes_pitchers() {
    let ids = parse_roster_batter_ids(&read_fixture("roster.json")).expect("fixture should parse");
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn side_queries_share_switch_hitters() {
    let people = parse_people_json(&read_fixture("people_bat_sides.json"))
        .expect("fixture should parse");

    let left = select_side(&people, Side::Left);
    let left_ids: Vec<u64> = left.iter().map(|b| b.id).collect();
    // Name order: Rafael Devers before Zack Short.
    assert_eq!(left_ids, vec![11, 10], "L query matches codes L and S");

    let right = select_side(&people, Side::Right);
    let right_ids: Vec<u64> = right.iter().map(|b| b.id).collect();
    // Sorted by name: Judge, Wong, LeMahieu, Stanton, Devers.
    assert!(right_ids.contains(&11), "R query matches codes R and S");
    assert!(right_ids.contains(&1) && right_ids.contains(&12));
    assert!(!right_ids.contains(&10));
    assert!(!right_ids.contains(&13), "missing batSide matches neither query");

    let names: Vec<&str> = right.iter().map(|b| b.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "results are ordered by name");
}

#[test]
fn positions_parse_and_annotate() {
    let positions =
        parse_positions_json(&read_fixture("positions.json")).expect("fixture should parse");
    assert_eq!(positions.get(&1).map(String::as_str), Some("RF"));
    assert_eq!(positions.get(&11).map(String::as_str), Some("3B"));
    // Stanton has no primaryPosition in the fixture.
    assert!(!positions.contains_key(&3));

    let text = annotate(
        &["Aaron Judge", "Giancarlo Stanton", "DJ LeMahieu"],
        &[1, 3, 2],
        &positions,
    );
    assert_eq!(text, "Aaron Judge (RF)\nGiancarlo Stanton ()\nDJ LeMahieu (2B)");
}

#[test]
fn annotate_round_trips_name_order() {
    let positions = HashMap::from([(1, "RF".to_string()), (2, "2B".to_string())]);
    let names = ["Aaron Judge", "DJ LeMahieu"];
    let text = annotate(&names, &[1, 2], &positions);
    let recovered: Vec<&str> = text
        .lines()
        .map(|line| line.rsplit_once(" (").expect("annotated line").0)
        .collect();
    assert_eq!(recovered, names);
}

#[test]
fn annotate_drops_empty_names() {
    let positions = HashMap::new();
    assert_eq!(annotate(&["", "DJ LeMahieu"], &[1, 2], &positions), "DJ LeMahieu ()");
    assert_eq!(annotate_group("", &[1, 2, 3], &positions), "");
}
