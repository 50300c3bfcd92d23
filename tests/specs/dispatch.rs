//! In-place dispatch: typed listeners mutating a shared event object.

use hark_core::{Event, EventDispatcher, TypedRegistry};
use serde_json::json;

fn bio_provider() -> TypedRegistry {
    TypedRegistry::new()
        .add(|event: &mut Event| {
            if event.payload().get("bio").is_some() {
                return;
            }
            let subject = event.subject().cloned().unwrap_or_default();
            let bio = format!(
                "{} <{}> just arrived",
                subject["name"].as_str().unwrap_or_default(),
                subject["email"].as_str().unwrap_or_default(),
            );
            event.payload_mut()["bio"] = json!(bio);
        })
        .unwrap()
        .add_in_ns("censor", |event: &mut Event| {
            let email = event
                .subject()
                .and_then(|subject| subject["email"].as_str())
                .unwrap_or_default()
                .to_string();
            let bio = event.payload()["bio"]
                .as_str()
                .unwrap_or_default()
                .replace(&email, "***@***.***");
            event.payload_mut()["bio"] = json!(bio);
        })
        .unwrap()
}

fn john_doe() -> serde_json::Value {
    json!({"name": "John Doe", "email": "john.doe@example.com"})
}

#[test]
fn before_save_listeners_build_and_censor_the_bio() {
    let dispatcher = EventDispatcher::new(bio_provider());

    let event = Event::new("before-save")
        .unwrap()
        .with_subject(john_doe())
        .with_payload(json!({}));

    let event = dispatcher.dispatch(event);
    assert_eq!(
        event.payload()["bio"],
        json!("John Doe <***@***.***> just arrived")
    );
}

#[test]
fn removing_the_censor_namespace_leaves_the_address_intact() {
    let dispatcher = EventDispatcher::new(bio_provider().remove("censor"));

    let event = Event::new("before-save")
        .unwrap()
        .with_subject(john_doe())
        .with_payload(json!({}));

    let event = dispatcher.dispatch(event);
    assert_eq!(
        event.payload()["bio"],
        json!("John Doe <john.doe@example.com> just arrived")
    );
}

#[test]
fn a_listener_can_stop_propagation() {
    let provider = TypedRegistry::new()
        .add(|event: &mut Event| {
            event.set_payload(json!(1));
            event.stop_propagation();
        })
        .unwrap()
        .add(|event: &mut Event| event.set_payload(json!(2)))
        .unwrap();

    let event = EventDispatcher::new(provider).dispatch(Event::new("save").unwrap());
    assert_eq!(event.payload(), &json!(1));
}

#[test]
fn an_event_stopped_before_dispatch_runs_zero_listeners() {
    let provider = TypedRegistry::new()
        .add(|event: &mut Event| event.set_payload(json!("touched")))
        .unwrap();

    let mut event = Event::new("save").unwrap();
    event.stop_propagation();

    let event = EventDispatcher::new(provider).dispatch(event);
    assert_eq!(event.payload(), &json!(null));
}

#[test]
fn swapping_the_provider_redirects_subsequent_dispatches() {
    let dispatcher = EventDispatcher::new(bio_provider());
    let silenced = dispatcher.with_provider(dispatcher.provider().remove(""));

    // The root-namespace bio listener is gone; only the censor remains.
    let event = Event::new("before-save")
        .unwrap()
        .with_subject(john_doe())
        .with_payload(json!({}));

    let event = silenced.dispatch(event);
    assert_eq!(event.payload().get("bio"), Some(&json!("")));
}
