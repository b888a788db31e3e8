use hbc_core::model::{Car, Coordinates, HumanBeingDraft, Mood};
use hbc_core::{
    CollectionOfHumanBeings, CollectionStore, ExecutionContext, Invoker, SharedCollection,
    ShutdownSignal,
};
use tempfile::TempDir;

/// Execution context backed by a data file inside `dir`
#[allow(dead_code)]
pub fn new_context(dir: &TempDir) -> ExecutionContext {
    ExecutionContext {
        collection: SharedCollection::new(CollectionOfHumanBeings::new()),
        shutdown: ShutdownSignal::new(),
        store: CollectionStore::new(dir.path().join("humans.json")),
    }
}

/// Invoker with every built-in command over a fresh context
#[allow(dead_code)]
pub fn builtin_invoker(dir: &TempDir) -> Invoker {
    Invoker::with_builtin_commands(new_context(dir))
}

/// Minimal valid draft
#[allow(dead_code)]
pub fn draft(name: &str, mood: Mood) -> HumanBeingDraft {
    HumanBeingDraft {
        name: name.to_string(),
        coordinates: Coordinates { x: 3, y: 4.5 },
        real_hero: false,
        has_toothpick: false,
        impact_speed: 100,
        soundtrack_name: "Blue in Green".to_string(),
        minutes_of_waiting: 15,
        mood,
        car: None,
    }
}

#[allow(dead_code)]
pub fn draft_with_car(name: &str, car: &str) -> HumanBeingDraft {
    HumanBeingDraft {
        car: Some(Car {
            name: car.to_string(),
            cool: true,
        }),
        ..draft(name, Mood::Calm)
    }
}

/// Insert drafts under keys 1..=n directly into the collection
#[allow(dead_code)]
pub fn populate(ctx: &ExecutionContext, drafts: Vec<HumanBeingDraft>) {
    let mut collection = ctx.collection.lock();
    for (i, d) in drafts.into_iter().enumerate() {
        collection.insert(i as i64 + 1, d).unwrap();
    }
}
