mod common;

use common::{builtin_invoker, draft, draft_with_car, populate};
use hbc_core::hbc_core_types::DispatchContext;
use hbc_core::model::Mood;
use hbc_core::{CommandArgument, Invoker, Request, Response};
use tempfile::TempDir;

fn send(invoker: &Invoker, name: &str, argument: CommandArgument) -> Response {
    let dispatch = DispatchContext::network("10.0.0.7:5000".parse().unwrap());
    invoker.execute_client_command(Request::new(name, argument), &dispatch)
}

// ===== QUERIES =====

#[test]
fn test_count_greater_than_mood() {
    // Scenario: moods Sadness, Gloom, Apathy, Calm; threshold 3 (GLOOM)
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(
        invoker.context(),
        vec![
            draft("a", Mood::Sadness),
            draft("b", Mood::Gloom),
            draft("c", Mood::Apathy),
            draft("d", Mood::Calm),
        ],
    );

    let response = send(&invoker, "count_greater_than_mood", CommandArgument::single("3"));

    assert_eq!(response, Response::text("People with Mood greater than GLOOM: 2"));
}

#[test]
fn test_count_greater_than_mood_rejects_non_integer() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let response = send(&invoker, "count_greater_than_mood", CommandArgument::single("abc"));

    assert!(response.is_error());
    assert_eq!(response.payload, "Expected integer value");
}

#[test]
fn test_count_greater_than_mood_out_of_range_shows_menu() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let response = send(&invoker, "count_greater_than_mood", CommandArgument::single("6"));

    assert!(response.is_error());
    assert!(response.payload.starts_with("Pick a Mood number:\n1 - SADNESS"));
}

#[test]
fn test_count_less_than_minutes_of_waiting() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut quick = draft("quick", Mood::Calm);
    quick.minutes_of_waiting = 2;
    populate(invoker.context(), vec![quick, draft("slow", Mood::Calm)]);

    let response = send(
        &invoker,
        "count_less_than_minutes_of_waiting",
        CommandArgument::single("10"),
    );

    assert_eq!(response.payload, "People waiting less than 10 minutes: 1");
}

#[test]
fn test_filter_by_car_returns_matching_elements() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(
        invoker.context(),
        vec![
            draft_with_car("a", "Lada"),
            draft_with_car("b", "Volvo"),
            draft("c", Mood::Calm),
        ],
    );

    let response = send(&invoker, "filter_by_car", CommandArgument::single("Lada"));

    assert_eq!(response.payload, "People with car Lada: 1");
    let elements = response.elements.unwrap();
    assert_eq!(elements[0].name, "a");
}

#[test]
fn test_show_empty_and_populated() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    assert_eq!(
        send(&invoker, "show", CommandArgument::none()).payload,
        "Collection is empty"
    );

    populate(invoker.context(), vec![draft("a", Mood::Calm)]);
    let response = send(&invoker, "show", CommandArgument::none());
    assert_eq!(response.elements.map(|e| e.len()), Some(1));
}

// ===== MUTATIONS =====

#[test]
fn test_insert_allocates_id_and_rejects_taken_key() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let first = send(
        &invoker,
        "insert",
        CommandArgument::single("7").with_element(draft("a", Mood::Calm)),
    );
    assert_eq!(first.payload, "Element inserted under key 7 with id 1");

    let second = send(
        &invoker,
        "insert",
        CommandArgument::single("7").with_element(draft("b", Mood::Calm)),
    );
    assert!(second.is_error());
    assert_eq!(second.payload, "Key 7 is already taken");
    assert_eq!(invoker.context().collection.lock().len(), 1);
}

#[test]
fn test_insert_after_max_id_is_rejected_without_panic() {
    // A data file may legitimately hold an element whose id is i64::MAX
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(invoker.context(), vec![draft("a", Mood::Calm)]);
    let mut json = serde_json::to_value(&*invoker.context().collection.lock()).unwrap();
    json["humans"]["1"]["id"] = serde_json::json!(i64::MAX);
    *invoker.context().collection.lock() = serde_json::from_value(json).unwrap();

    let response = send(
        &invoker,
        "insert",
        CommandArgument::single("2").with_element(draft("b", Mood::Calm)),
    );

    assert!(response.is_error());
    assert_eq!(response.payload, "Id space exhausted");
    assert_eq!(invoker.context().collection.lock().len(), 1);
    let show = send(&invoker, "show", CommandArgument::none());
    assert_eq!(show.elements.map(|e| e.len()), Some(1));
}

#[test]
fn test_insert_without_element_is_rejected() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let response = send(&invoker, "insert", CommandArgument::single("1"));

    assert_eq!(response, Response::error("Command insert needs an element"));
}

#[test]
fn test_insert_with_invalid_element_is_rejected() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut bad = draft("a", Mood::Calm);
    bad.impact_speed = 663;

    let response = send(&invoker, "insert", CommandArgument::single("1").with_element(bad));

    assert_eq!(response.payload, "Impact speed should be at most 662");
    assert!(invoker.context().collection.lock().is_empty());
}

#[test]
fn test_update_keeps_id_and_creation_date() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(invoker.context(), vec![draft("old", Mood::Calm)]);
    let created = invoker.context().collection.lock().get(1).unwrap().creation_date;

    let response = send(
        &invoker,
        "update",
        CommandArgument::single("1").with_element(draft("new", Mood::Gloom)),
    );

    assert_eq!(response.payload, "Element 1 updated");
    let collection = invoker.context().collection.lock();
    let human = collection.get(1).unwrap();
    assert_eq!(human.name, "new");
    assert_eq!(human.id, 1);
    assert_eq!(human.creation_date, created);
}

#[test]
fn test_update_rejects_non_positive_and_unknown_id() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let zero = send(
        &invoker,
        "update",
        CommandArgument::single("0").with_element(draft("x", Mood::Calm)),
    );
    assert_eq!(zero.payload, "Id should be positive");

    let unknown = send(
        &invoker,
        "update",
        CommandArgument::single("42").with_element(draft("x", Mood::Calm)),
    );
    assert_eq!(unknown.payload, "No element with id 42");
}

#[test]
fn test_remove_key_and_remove_lower_key() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(
        invoker.context(),
        vec![
            draft("a", Mood::Calm),
            draft("b", Mood::Calm),
            draft("c", Mood::Calm),
            draft("d", Mood::Calm),
        ],
    );

    let missing = send(&invoker, "remove_key", CommandArgument::single("9"));
    assert_eq!(missing.payload, "No element under key 9");

    let removed = send(&invoker, "remove_key", CommandArgument::single("4"));
    assert!(!removed.is_error());

    let lower = send(&invoker, "remove_lower_key", CommandArgument::single("3"));
    assert_eq!(lower.payload, "Removed 2 element(s) with key lower than 3");

    let collection = invoker.context().collection.lock();
    assert_eq!(collection.len(), 1);
    assert!(collection.contains_key(3));
}

#[test]
fn test_remove_greater_uses_natural_order() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    let mut slow = draft("slow", Mood::Calm);
    slow.impact_speed = 10;
    let mut fast = draft("fast", Mood::Calm);
    fast.impact_speed = 500;
    populate(invoker.context(), vec![slow, fast]);

    let mut pivot = draft("pivot", Mood::Calm);
    pivot.impact_speed = 100;
    let response = send(
        &invoker,
        "remove_greater",
        CommandArgument::none().with_element(pivot),
    );

    assert_eq!(response.payload, "Removed 1 element(s) greater than pivot");
    let collection = invoker.context().collection.lock();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get(1).unwrap().name, "slow");
}

#[test]
fn test_clear_empties_collection() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);
    populate(invoker.context(), vec![draft("a", Mood::Calm)]);

    let response = send(&invoker, "clear", CommandArgument::none());

    assert_eq!(response.payload, "Collection cleared");
    assert!(invoker.context().collection.lock().is_empty());
}

#[test]
fn test_execute_script_acknowledges() {
    let dir = TempDir::new().unwrap();
    let invoker = builtin_invoker(&dir);

    let response = send(&invoker, "execute_script", CommandArgument::single("batch.txt"));

    assert_eq!(response.payload, "Executing script batch.txt");
}
