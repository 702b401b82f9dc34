use rchoreboard::errors::AppError;
use rchoreboard::models::chore::Chore;
use rchoreboard::models::member::FamilyMember;
use rchoreboard::models::rotation_order::RotationOrder;
use rchoreboard::models::wire::{ChorePayload, DashboardResponse, SetAvailability};
use serde_json::json;

#[test]
fn rotation_order_keeps_its_order() {
    let order = RotationOrder::new(vec![2, 5, 1]);
    let text = order.to_json().unwrap();
    assert_eq!(text, "[2,5,1]");

    let back = RotationOrder::from_json(Some(&text)).unwrap();
    assert_eq!(back.as_slice(), &[2, 5, 1]);
    assert_ne!(back, RotationOrder::new(vec![1, 2, 5]));
}

#[test]
fn rotation_order_blank_values_mean_no_rotation() {
    assert!(RotationOrder::from_json(None).unwrap().is_empty());
    assert!(RotationOrder::from_json(Some("")).unwrap().is_empty());
    assert!(RotationOrder::from_json(Some("null")).unwrap().is_empty());
    assert!(matches!(
        RotationOrder::from_json(Some("[1,")),
        Err(AppError::InvalidRotation(_))
    ));
}

#[test]
fn rotation_order_from_cli_list() {
    assert_eq!(RotationOrder::parse_list("2, 5,1").unwrap().as_slice(), &[2, 5, 1]);
    assert!(RotationOrder::parse_list("2,x").is_err());
}

#[test]
fn set_availability_uses_integer_booleans() {
    let body = SetAvailability {
        person_id: 3,
        is_available: false,
        unavailable_since: Some(1_750_000_000),
        unavailable_until: Some(1_750_086_400),
    };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(
        value,
        json!({
            "person_id": 3,
            "is_available": 0,
            "unavailable_since": 1_750_000_000i64,
            "unavailable_until": 1_750_086_400i64
        })
    );

    let parsed: SetAvailability =
        serde_json::from_value(json!({"person_id": 3, "is_available": 1})).unwrap();
    assert!(parsed.is_available);
    assert_eq!(parsed.unavailable_since, None);
}

#[test]
fn chore_payload_round_trip() {
    let mut chore = Chore::rotating("Dishes", 1, RotationOrder::new(vec![2, 5, 1]));
    chore.last_assigned_index = 1;
    chore.last_done = Some(1_750_000_123);

    let payload = ChorePayload::from_chore(&chore).unwrap();
    assert_eq!(payload.rotation_order.as_deref(), Some("[2,5,1]"));

    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["rotation_enabled"], 1);
    assert_eq!(value["last_done"], 1_750_000_123i64);

    let back: ChorePayload = serde_json::from_value(value).unwrap();
    let restored = back.into_chore(7).unwrap();
    assert_eq!(restored.id, 7);
    assert_eq!(restored.rotation_order.as_slice(), &[2, 5, 1]);
    assert_eq!(restored.last_assigned_index, 1);
    assert_eq!(restored.last_done, Some(1_750_000_123));
}

#[test]
fn chore_payload_defaults() {
    let payload: ChorePayload =
        serde_json::from_value(json!({"name": "Trash", "interval": 2, "worker_id": 4})).unwrap();
    assert!(!payload.rotation_enabled);
    assert_eq!(payload.last_assigned_index, -1);

    let chore = payload.into_chore(1).unwrap();
    assert_eq!(chore.worker_id, Some(4));
    assert!(!chore.uses_rotation());
}

#[test]
fn chore_payload_rejects_enabled_rotation_without_members() {
    let payload: ChorePayload = serde_json::from_value(json!({
        "name": "Dishes",
        "interval": 1,
        "rotation_enabled": 1,
        "rotation_order": "[]"
    }))
    .unwrap();
    assert!(matches!(payload.into_chore(1), Err(AppError::InvalidState(_))));
}

#[test]
fn member_availability_flag_on_the_wire() {
    let member: FamilyMember = serde_json::from_value(json!({
        "id": 2,
        "name": "Ben",
        "role": "child",
        "is_available": 0,
        "unavailable_since": null,
        "unavailable_until": null
    }))
    .unwrap();
    assert!(!member.is_available);
    assert!(member.window().is_none());
}

#[test]
fn dashboard_response_field_names() {
    let value = serde_json::to_value(DashboardResponse::default()).unwrap();
    assert!(value.get("duePlants").is_some());
    assert!(value.get("dueChores").is_some());
    assert!(value.get("pendingTasks").is_some());

    let legacy: DashboardResponse =
        serde_json::from_value(json!({"duePlants": [], "dueChores": []})).unwrap();
    assert!(legacy.pending_tasks.is_empty());
}
