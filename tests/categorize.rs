use std::collections::HashSet;

use platoon_matchups::categorize::{partition_batters, FAVORABLE_RATING};
use platoon_matchups::roster_fetch::Batter;

fn batter(name: &str, id: u64) -> Batter {
    Batter {
        name: name.to_string(),
        id,
    }
}

#[test]
fn favorable_left_side_lists_left_batters_only() {
    let left = vec![batter("Aaron Judge", 1), batter("DJ LeMahieu", 2)];
    let right = vec![batter("Giancarlo Stanton", 3)];

    let groups = partition_batters(&left, &right, 9.0, 3.0);
    assert_eq!(groups.lh_text, "Aaron Judge\nDJ LeMahieu");
    assert_eq!(groups.rh_text, "", "RHB below threshold keeps text empty");
    assert_eq!(groups.sw_text, "");
    assert_eq!(groups.lh_ids, vec![1, 2]);
    assert_eq!(groups.rh_ids, vec![3], "ids are computed regardless of gating");
    assert!(groups.sw_ids.is_empty());
}

#[test]
fn overlapping_ids_become_switch_hitters() {
    let left = vec![batter("Rafael Devers", 11), batter("Zack Short", 10)];
    let right = vec![batter("Connor Wong", 12), batter("Rafael Devers", 11)];

    let groups = partition_batters(&left, &right, 5.0, 8.0);
    assert_eq!(groups.sw_ids, vec![11]);
    assert_eq!(groups.lh_ids, vec![10]);
    assert_eq!(groups.rh_ids, vec![12]);
    // Either favorable side is enough to list switch hitters.
    assert_eq!(groups.sw_text, "Rafael Devers");
    assert_eq!(groups.lh_text, "");
    assert_eq!(groups.rh_text, "Connor Wong");
}

#[test]
fn switch_detection_is_symmetric() {
    let a = vec![batter("Rafael Devers", 11), batter("Zack Short", 10)];
    let b = vec![batter("Connor Wong", 12), batter("Rafael Devers", 11)];

    let forward = partition_batters(&a, &b, 8.0, 8.0);
    let swapped = partition_batters(&b, &a, 8.0, 8.0);
    assert_eq!(forward.sw_ids, swapped.sw_ids);
    assert_eq!(forward.sw_text, swapped.sw_text);
}

#[test]
fn each_id_lands_in_exactly_one_group() {
    let left = vec![
        batter("Switch One", 1),
        batter("Lefty", 2),
        batter("Switch Two", 3),
    ];
    let right = vec![
        batter("Switch One", 1),
        batter("Righty", 4),
        batter("Switch Two", 3),
    ];

    let groups = partition_batters(&left, &right, 9.0, 9.0);
    let mut seen = HashSet::new();
    for id in groups
        .lh_ids
        .iter()
        .chain(groups.rh_ids.iter())
        .chain(groups.sw_ids.iter())
    {
        assert!(seen.insert(*id), "id {id} appeared in more than one group");
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn threshold_gating_is_monotonic_at_eight() {
    let left = vec![batter("Lefty", 2)];
    let right = vec![batter("Righty", 4)];

    let below = partition_batters(&left, &right, 7.0, 3.0);
    assert_eq!(below.lh_text, "");

    let at = partition_batters(&left, &right, FAVORABLE_RATING, 3.0);
    assert_eq!(at.lh_text, "Lefty");
    assert_eq!(at.rh_text, below.rh_text, "other side unaffected");
    assert_eq!(at.lh_ids, below.lh_ids);
    assert_eq!(at.rh_ids, below.rh_ids);
}

#[test]
fn favorable_rating_with_no_batters_is_still_empty() {
    let groups = partition_batters(&[], &[batter("Righty", 4)], 10.0, 0.0);
    assert_eq!(groups.lh_text, "");
    assert!(groups.lh_ids.is_empty());
}

#[test]
fn missing_ratings_read_as_zero_and_fail_the_gate() {
    let left = vec![batter("Lefty", 2)];
    let groups = partition_batters(&left, &[], 0.0, 0.0);
    assert_eq!(groups.lh_text, "");
    assert_eq!(groups.sw_text, "");
    assert_eq!(groups.lh_ids, vec![2]);
}

#[test]
fn switch_group_is_ordered_by_name() {
    let left = vec![batter("Zeta Switch", 1), batter("Alpha Switch", 2)];
    let right = vec![batter("Zeta Switch", 1), batter("Alpha Switch", 2)];

    let groups = partition_batters(&left, &right, 8.0, 0.0);
    assert_eq!(groups.sw_text, "Alpha Switch\nZeta Switch");
    assert_eq!(groups.sw_ids, vec![2, 1]);
}
