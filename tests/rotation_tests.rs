mod common;
use common::{availability, rotating};
use rchoreboard::core::availability::{Availability, AvailabilityStore};
use rchoreboard::core::rotation::{
    advance_rotation, advance_with_credit, current_assignee, resolve, responsible_member,
    start_position,
};
use rchoreboard::errors::AppError;
use rchoreboard::models::chore::Chore;
use rchoreboard::models::rotation_order::RotationOrder;
use rchoreboard::models::wire::{ChorePayload, SetAvailability};

const NOW: i64 = 1_750_000_000;

#[test]
fn start_position_wraps_euclidean() {
    assert_eq!(start_position(-1, 3), 0);
    assert_eq!(start_position(0, 3), 1);
    assert_eq!(start_position(2, 3), 0);
    assert_eq!(start_position(7, 3), 2);
    assert_eq!(start_position(-5, 3), 2);
}

#[test]
fn start_position_accepts_extreme_indices() {
    assert_eq!(start_position(i64::MAX, 3), ((i64::MAX % 3 + 1) % 3) as usize);
    assert_eq!(start_position(i64::MIN, 3), (i64::MIN.rem_euclid(3) as usize + 1) % 3);
    assert_eq!(start_position(i64::MAX, 1), 0);
    assert_eq!(start_position(5, 0), 0);
}

#[test]
fn extreme_stored_index_still_resolves() {
    let payload: ChorePayload = serde_json::from_value(serde_json::json!({
        "name": "Dishes",
        "interval": 1,
        "rotation_enabled": 1,
        "rotation_order": "[1,2,3]",
        "last_assigned_index": i64::MAX
    }))
    .unwrap();
    let mut chore = payload.into_chore(1).unwrap();
    let avail = availability(&[1, 2, 3], &[]);

    let who = current_assignee(&chore, &avail, NOW).unwrap();
    assert!([1, 2, 3].contains(&who));

    chore.last_assigned_index = i64::MIN;
    let who = current_assignee(&chore, &avail, NOW).unwrap();
    assert!([1, 2, 3].contains(&who));

    let advanced = advance_rotation(&chore, &avail, NOW).unwrap();
    assert!((0..3).contains(&advanced.last_assigned_index));
}

#[test]
fn assignee_is_always_in_rotation_order() {
    let order = [4, 9, 2];
    let avail = availability(&[4, 9], &[2]);

    for last in -3..10 {
        let chore = rotating(&order, last);
        let who = current_assignee(&chore, &avail, NOW).unwrap();
        assert!(order.contains(&who), "index {last} gave {who}");
    }
}

#[test]
fn single_available_member_always_gets_the_chore() {
    let order = [1, 2, 3, 4];
    let avail = availability(&[3], &[1, 2, 4]);

    for last in -1..8 {
        let chore = rotating(&order, last);
        assert_eq!(current_assignee(&chore, &avail, NOW).unwrap(), 3);
    }
}

#[test]
fn all_unavailable_falls_back_to_start_slot() {
    let order = [1, 2, 3];
    let avail = availability(&[], &[1, 2, 3]);

    for last in -1..6 {
        let chore = rotating(&order, last);
        let a = resolve(&chore, &avail, NOW).unwrap();
        assert!(a.fallback);
        assert_eq!(a.member_id, order[start_position(last, 3)]);
        assert_eq!(a.skipped.len(), 3);
    }
}

#[test]
fn single_member_rotation_returns_that_member() {
    let chore = rotating(&[7], 0);
    assert_eq!(current_assignee(&chore, &availability(&[7], &[]), NOW).unwrap(), 7);
    assert_eq!(current_assignee(&chore, &availability(&[], &[7]), NOW).unwrap(), 7);
}

#[test]
fn advance_never_repeats_with_two_available() {
    let avail = availability(&[1, 2, 3], &[]);
    let mut chore = rotating(&[1, 2, 3], -1);

    let mut previous = None;
    for step in 0..9 {
        let who = current_assignee(&chore, &avail, NOW).unwrap();
        if let Some(prev) = previous {
            assert_ne!(prev, who, "repeat at step {step}");
        }
        previous = Some(who);
        chore = advance_rotation(&chore, &avail, NOW + step).unwrap();
    }
}

#[test]
fn advance_with_some_members_away_never_repeats() {
    let avail = availability(&[1, 3], &[2]);
    let mut chore = rotating(&[1, 2, 3], -1);

    let mut seen = Vec::new();
    for _ in 0..4 {
        let credited = advance_with_credit(&chore, &avail, NOW).unwrap();
        seen.push(credited.credited);
        chore = credited.chore;
    }
    assert_eq!(seen, vec![1, 3, 1, 3]);
}

#[test]
fn skip_scenario_from_walkthrough() {
    let chore = rotating(&[1, 2, 3], 0);
    let two_away = availability(&[1, 3], &[2]);

    let a = resolve(&chore, &two_away, NOW).unwrap();
    assert_eq!(a.member_id, 3);
    assert_eq!(a.skipped, vec![2]);
    assert!(!a.fallback);

    let advanced = advance_rotation(&chore, &two_away, NOW).unwrap();
    assert_eq!(advanced.last_assigned_index, 2);
    assert_eq!(advanced.last_done, Some(NOW));

    let everyone = availability(&[1, 2, 3], &[]);
    assert_eq!(current_assignee(&advanced, &everyone, NOW).unwrap(), 1);
}

#[test]
fn advance_sets_index_to_credited_position_not_plus_one() {
    let chore = rotating(&[5, 6, 7], 0);
    let avail = availability(&[5, 7], &[6]);

    let out = advance_with_credit(&chore, &avail, NOW).unwrap();
    assert_eq!(out.credited, 7);
    assert_eq!(out.chore.last_assigned_index, 2);
    // input value is untouched
    assert_eq!(chore.last_assigned_index, 0);
    assert_eq!(chore.last_done, None);
}

#[test]
fn empty_rotation_is_invalid_state() {
    let chore = rotating(&[], -1);
    let avail = availability(&[1], &[]);

    assert!(matches!(resolve(&chore, &avail, NOW), Err(AppError::InvalidState(_))));
    assert!(matches!(advance_rotation(&chore, &avail, NOW), Err(AppError::InvalidState(_))));
}

#[test]
fn resolver_rejects_non_rotating_chore() {
    let chore = Chore::single("Trash", 2, 4);
    let avail = availability(&[4], &[]);
    assert!(matches!(current_assignee(&chore, &avail, NOW), Err(AppError::InvalidState(_))));
}

#[test]
fn responsible_member_for_single_and_rotating() {
    let avail = availability(&[1, 2], &[]);

    let single = Chore::single("Trash", 2, 2);
    assert_eq!(responsible_member(&single, &avail, NOW).unwrap(), 2);

    // rotation wins over a leftover worker id
    let mut legacy = rotating(&[1, 2], 0);
    legacy.worker_id = Some(1);
    assert_eq!(responsible_member(&legacy, &avail, NOW).unwrap(), 2);

    let mut orphan = Chore::single("Orphan", 1, 1);
    orphan.worker_id = None;
    assert!(matches!(responsible_member(&orphan, &avail, NOW), Err(AppError::InvalidState(_))));
}

#[test]
fn non_rotating_advance_only_updates_last_done() {
    let chore = Chore::single("Trash", 2, 3);
    let avail = availability(&[3], &[]);

    let out = advance_with_credit(&chore, &avail, NOW).unwrap();
    assert_eq!(out.credited, 3);
    assert_eq!(out.chore.last_done, Some(NOW));
    assert_eq!(out.chore.last_assigned_index, -1);
}

#[test]
fn unavailability_window_is_inclusive() {
    let away = Availability::away(100, 200);
    assert!(away.is_available_at(99));
    assert!(!away.is_available_at(100));
    assert!(!away.is_available_at(150));
    assert!(!away.is_available_at(200));
    assert!(away.is_available_at(201));
}

#[test]
fn half_open_window_is_ignored() {
    let only_since = Availability {
        is_available: true,
        unavailable_since: Some(100),
        unavailable_until: None,
    };
    assert!(only_since.is_available_at(150));
    assert!(!Availability::unavailable().is_available_at(150));
}

#[test]
fn window_skips_member_only_while_it_lasts() {
    let mut avail = availability(&[1, 3], &[]);
    avail.insert(2, Availability::away(NOW - 60, NOW + 60));
    let chore = rotating(&[1, 2, 3], 0);

    assert_eq!(current_assignee(&chore, &avail, NOW).unwrap(), 3);
    assert_eq!(current_assignee(&chore, &avail, NOW + 61).unwrap(), 2);
}

#[test]
fn unknown_members_count_as_unavailable() {
    let avail = availability(&[1, 3], &[]);
    let chore = rotating(&[1, 42, 3], 0);

    let a = resolve(&chore, &avail, NOW).unwrap();
    assert_eq!(a.member_id, 3);
    assert_eq!(a.skipped, vec![42]);
}

#[test]
fn stale_snapshot_is_flagged_not_fatal() {
    let avail = AvailabilityStore::new(NOW - 3600).with_stale_after(900);
    let chore = rotating(&[1, 2], -1);

    let a = resolve(&chore, &avail, NOW).unwrap();
    assert!(a.stale);
    assert!(a.fallback);
    assert_eq!(a.member_id, 1);
}

#[test]
fn apply_updates_store_and_reruns_resolver() {
    let mut avail = availability(&[1, 2], &[]);
    let chore = rotating(&[1, 2], 0);
    assert_eq!(current_assignee(&chore, &avail, NOW).unwrap(), 2);

    avail
        .apply(&SetAvailability {
            person_id: 2,
            is_available: false,
            unavailable_since: None,
            unavailable_until: None,
        })
        .unwrap();
    assert_eq!(current_assignee(&chore, &avail, NOW).unwrap(), 1);

    let backwards = SetAvailability {
        person_id: 1,
        is_available: true,
        unavailable_since: Some(NOW),
        unavailable_until: Some(NOW - 1),
    };
    assert!(matches!(avail.apply(&backwards), Err(AppError::Validation(_))));
}

#[test]
fn duplicate_rotation_members_are_rejected() {
    let chore = Chore::rotating("Dishes", 1, RotationOrder::new(vec![1, 2, 1]));
    assert!(matches!(chore.validate(), Err(AppError::InvalidRotation(_))));
}
