//! Fold dispatch: named triggers threading a payload accumulator.

use hark_core::{EventManager, Handler, NameRegistry, TriggerDispatcher};
use serde_json::{json, Value};
use std::sync::Arc;

fn bio_registry() -> NameRegistry<Value, Value> {
    NameRegistry::new()
        .add("before-save", |subject: &Value, mut payload: Value| {
            if payload.get("bio").is_none() {
                payload["bio"] = json!(format!(
                    "{} <{}> just arrived",
                    subject["name"].as_str().unwrap_or_default(),
                    subject["email"].as_str().unwrap_or_default(),
                ));
            }
            payload
        })
        .unwrap()
        .add("before-save.censor", |subject: &Value, mut payload: Value| {
            let email = subject["email"].as_str().unwrap_or_default();
            let bio = payload["bio"]
                .as_str()
                .unwrap_or_default()
                .replace(email, "***@***.***");
            payload["bio"] = json!(bio);
            payload
        })
        .unwrap()
}

fn john_doe() -> Value {
    json!({"name": "John Doe", "email": "john.doe@example.com"})
}

#[test]
fn before_save_triggers_build_and_censor_the_bio() {
    let dispatcher = TriggerDispatcher::new(bio_registry());

    let payload = dispatcher
        .trigger("before-save", &john_doe(), json!({}))
        .unwrap();
    assert_eq!(payload["bio"], json!("John Doe <***@***.***> just arrived"));
}

#[test]
fn removing_the_censor_sub_event_leaves_the_address_intact() {
    let dispatcher = TriggerDispatcher::new(bio_registry());
    let uncensored = dispatcher.with_registry(dispatcher.registry().remove("*.censor"));

    let payload = uncensored
        .trigger("before-save", &john_doe(), json!({}))
        .unwrap();
    assert_eq!(
        payload["bio"],
        json!("John Doe <john.doe@example.com> just arrived")
    );
}

#[test]
fn triggering_the_sub_event_does_not_run_the_parent() {
    let dispatcher = TriggerDispatcher::new(bio_registry());

    let payload = dispatcher
        .trigger("before-save.censor", &john_doe(), json!({"bio": "keep"}))
        .unwrap();
    assert_eq!(payload["bio"], json!("keep"));
}

#[test]
fn sync_triggers_fold_the_payload() {
    let registry: NameRegistry<(), i64> = NameRegistry::new()
        .add("sync", |_: &(), total: i64| total + 10)
        .unwrap()
        .add("sync", |_: &(), total: i64| total + 20)
        .unwrap();

    let total = TriggerDispatcher::new(registry)
        .trigger("sync", &(), 5)
        .unwrap();
    assert_eq!(total, 35);
}

#[test]
fn removal_without_matches_returns_the_same_registry() {
    let registry: NameRegistry<(), i64> = NameRegistry::new()
        .add("sync", |_: &(), total: i64| total)
        .unwrap();

    let removed = registry.remove("sync");
    assert!(removed.remove("sync").ptr_eq(&removed));
    assert!(removed.remove("does-not-exist").ptr_eq(&removed));
    assert!(!registry.remove("sync").ptr_eq(&registry));
}

#[test]
fn manager_sets_register_and_unregister_handler_groups() {
    let add_ten: Arc<dyn Handler<(), i64>> = Arc::new(|_: &(), total: i64| total + 10);
    let double: Arc<dyn Handler<(), i64>> = Arc::new(|_: &(), total: i64| total * 2);

    let manager = EventManager::new(TriggerDispatcher::default())
        .with("recount", vec![add_ten, double])
        .unwrap();

    assert!(manager.has("recount"));
    assert_eq!(manager.dispatcher().trigger("recount", &(), 5).unwrap(), 30);

    let manager = manager.without("recount");
    assert!(!manager.has("recount"));
    assert_eq!(manager.dispatcher().trigger("recount", &(), 5).unwrap(), 5);
}
