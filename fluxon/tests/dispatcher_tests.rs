/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use fluxon::prelude::*;

use crate::setup::*;

mod setup;

fn counting(hits: Arc<AtomicUsize>) -> Handler {
    handler(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

#[test]
fn register_then_dispatch_invokes_handler_once() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let hits = Arc::new(AtomicUsize::new(0));

    dispatcher.register("test", counting(hits.clone()))?;
    dispatcher.dispatch("test", payload(json!({ "foo": "bar" })))?;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn handler_receives_the_dispatched_payload() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let seen = Arc::new(Mutex::new(None));

    let seen_in = seen.clone();
    dispatcher.register(
        "test",
        handler(move |payload| {
            let value = downcast_payload::<Value>(payload).expect("a json payload");
            *seen_in.lock().unwrap() = Some(value.clone());
            Ok(())
        }),
    )?;
    dispatcher.dispatch("test", payload(json!({ "foo": "bar" })))?;

    assert_eq!(seen.lock().unwrap().clone(), Some(json!({ "foo": "bar" })));
    Ok(())
}

#[test]
fn unregister_stops_delivery() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = counting(hits.clone());

    dispatcher.register("test", h.clone())?;
    dispatcher.unregister("test", &h)?;
    dispatcher.dispatch("test", payload(()))?;

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn unregister_removes_exactly_one_registration() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = counting(hits.clone());

    dispatcher.register("test", h.clone())?.register("test", h.clone())?;
    dispatcher.unregister("test", &h)?;
    dispatcher.dispatch("test", payload(()))?;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn unregistering_an_unknown_handler_is_a_quiet_no_op() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let h = counting(Arc::new(AtomicUsize::new(0)));

    dispatcher.unregister("test", &h)?;
    Ok(())
}

#[test]
fn wildcard_segment_matches_one_concrete_segment() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let hits = Arc::new(AtomicUsize::new(0));

    dispatcher.register("a:*", counting(hits.clone()))?;

    dispatcher.dispatch("a:b", payload(()))?;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // wrong segment count on either side of the pattern
    dispatcher.dispatch("a", payload(()))?;
    dispatcher.dispatch("a:c:d", payload(()))?;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    dispatcher.dispatch("a:c", payload(()))?;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn delivery_order_is_registration_order_across_patterns() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let first = order.clone();
    let second = order.clone();
    dispatcher
        .register(
            "nav:*",
            handler(move |_| {
                first.lock().unwrap().push("wildcard");
                Ok(())
            }),
        )?
        .register(
            "nav:go",
            handler(move |_| {
                second.lock().unwrap().push("literal");
                Ok(())
            }),
        )?;

    dispatcher.dispatch("nav:go", payload(()))?;
    assert_eq!(*order.lock().unwrap(), vec!["wildcard", "literal"]);
    Ok(())
}

#[test]
fn empty_names_are_rejected_everywhere() {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let h = counting(Arc::new(AtomicUsize::new(0)));

    assert!(matches!(
        dispatcher.register("", h.clone()),
        Err(FluxonError::InvalidArgument(_))
    ));
    assert!(matches!(
        dispatcher.unregister("", &h),
        Err(FluxonError::InvalidArgument(_))
    ));
    assert!(matches!(
        dispatcher.dispatch("", payload(())),
        Err(FluxonError::InvalidArgument(_))
    ));
}

#[test]
fn dispatching_a_wildcard_name_is_rejected() {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    assert!(matches!(
        dispatcher.dispatch("a:*", payload(())),
        Err(FluxonError::InvalidArgument(_))
    ));
}

#[test]
fn failing_handler_aborts_delivery_to_later_handlers() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let hits = Arc::new(AtomicUsize::new(0));

    dispatcher
        .register("boom", handler(|_| anyhow::bail!("Belgium!")))?
        .register("boom", counting(hits.clone()))?;

    let result = dispatcher.dispatch("boom", payload(()));
    match result {
        Err(FluxonError::HandlerFailed { event, source }) => {
            assert_eq!(event, "boom");
            assert_eq!(source.to_string(), "Belgium!");
        }
        other => panic!("expected HandlerFailed, got {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    Ok(())
}

#[derive(Debug, Default)]
struct RecordingJournal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl DispatchJournal for RecordingJournal {
    fn record(&self, name: &EventName, _payload: &Payload) {
        self.entries.lock().unwrap().push(format!("journal:{name}"));
    }
}

#[test]
fn journal_records_every_dispatch_before_handlers_run() -> anyhow::Result<()> {
    initialize_tracing();
    let entries = Arc::new(Mutex::new(Vec::new()));
    let journal = RecordingJournal {
        entries: entries.clone(),
    };
    let dispatcher = Dispatcher::with_journal(Arc::new(journal));

    let handler_entries = entries.clone();
    dispatcher.register(
        "test",
        handler(move |_| {
            handler_entries.lock().unwrap().push("handler".to_string());
            Ok(())
        }),
    )?;

    dispatcher.dispatch("test", payload(()))?;
    // unmatched dispatches are journaled too
    dispatcher.dispatch("other", payload(()))?;

    assert_eq!(
        *entries.lock().unwrap(),
        vec!["journal:test", "handler", "journal:other"]
    );
    Ok(())
}

#[test]
fn clones_share_one_registry() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = Dispatcher::new();
    let hits = Arc::new(AtomicUsize::new(0));

    dispatcher.clone().register("test", counting(hits.clone()))?;
    dispatcher.dispatch("test", payload(()))?;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(dispatcher.subscriber_count(), 1);
    Ok(())
}
