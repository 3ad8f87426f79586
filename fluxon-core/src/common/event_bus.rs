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
use std::fmt::Debug;
use std::sync::Arc;

use derive_new::new;
use parking_lot::RwLock;
use tracing::{trace, warn};

use crate::common::config::CONFIG;
use crate::common::{Handler, Payload};
use crate::message::{EventName, EventPattern, FluxonError};

/// The leaf publish/subscribe primitive underneath both the
/// [`Dispatcher`](crate::common::Dispatcher) and each
/// [`Store`](crate::common::Store)'s change notifications.
///
/// Subscriptions are held in one ordered registry: delivery order is the order
/// of subscription, across all patterns. Subscribing the same handler `Arc`
/// twice registers it twice; [`unsubscribe`](EventBus::unsubscribe) removes one
/// registration at a time, matched by pattern and handler allocation.
///
/// Publishing snapshots the matching handlers before invoking any of them, so a
/// handler may subscribe or unsubscribe re-entrantly; such changes take effect
/// from the next publish.
#[derive(Default)]
pub struct EventBus {
    subscriptions: RwLock<Vec<Subscription>>,
}

/// One registration: a parsed pattern plus the handler to deliver to.
#[derive(new)]
struct Subscription {
    pattern: EventPattern,
    handler: Handler,
}

impl Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.read().len())
            .finish()
    }
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscription of `handler` under the pattern `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    pub fn subscribe(&self, name: &str, handler: Handler) -> Result<(), FluxonError> {
        let pattern = EventPattern::parse(name)?;
        let mut subscriptions = self.subscriptions.write();
        subscriptions.push(Subscription::new(pattern, handler));
        if subscriptions.len() == CONFIG.limits.subscriber_high_water_mark {
            warn!(
                count = subscriptions.len(),
                "subscriber registry reached its high-water mark"
            );
        }
        trace!(pattern = name, count = subscriptions.len(), "subscribed");
        Ok(())
    }

    /// Removes the earliest subscription whose pattern equals `name` and whose
    /// handler is the same allocation as `handler`. Other registrations of the
    /// same pair are left intact; a no-op when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    pub fn unsubscribe(&self, name: &str, handler: &Handler) -> Result<(), FluxonError> {
        let pattern = EventPattern::parse(name)?;
        let mut subscriptions = self.subscriptions.write();
        if let Some(index) = subscriptions
            .iter()
            .position(|s| s.pattern == pattern && Arc::ptr_eq(&s.handler, handler))
        {
            subscriptions.remove(index);
            trace!(pattern = name, "unsubscribed");
        }
        Ok(())
    }

    /// Validates `name` as a concrete event name and delivers `payload` to every
    /// matching handler, in subscription order, before returning.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty or contains
    /// a wildcard segment, and [`FluxonError::HandlerFailed`] when a handler
    /// errors (aborting delivery to the handlers after it).
    pub fn publish(&self, name: &str, payload: &Payload) -> Result<(), FluxonError> {
        let event = EventName::new(name)?;
        if !event.is_concrete() {
            return Err(FluxonError::InvalidArgument(format!(
                "cannot publish a wildcard name: '{event}'"
            )));
        }
        self.publish_event(&event, payload)
    }

    /// Delivers to an already-validated event name. The read lock is released
    /// before any handler runs.
    pub(crate) fn publish_event(
        &self,
        event: &EventName,
        payload: &Payload,
    ) -> Result<(), FluxonError> {
        let matching: Vec<Handler> = self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.pattern.matches(event))
            .map(|s| s.handler.clone())
            .collect();
        trace!(event = %event, handlers = matching.len(), "publishing");
        for handler in matching {
            handler(payload).map_err(|source| FluxonError::HandlerFailed {
                event: event.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Current number of registrations, all patterns included.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::common::{handler, payload};

    fn counting_handler(hits: Arc<AtomicUsize>) -> Handler {
        handler(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn unsubscribe_removes_one_registration_by_identity() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = counting_handler(hits.clone());

        bus.subscribe("tick", h.clone()).unwrap();
        bus.subscribe("tick", h.clone()).unwrap();
        bus.unsubscribe("tick", &h).unwrap();

        bus.publish("tick", &payload(())).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // removing an unknown pair is a no-op, not an error
        bus.unsubscribe("tock", &h).unwrap();
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn delivery_follows_subscription_order_across_patterns() {
        let bus = EventBus::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let first = order.clone();
        bus.subscribe(
            "job:*",
            handler(move |_| {
                first.lock().push("wildcard");
                Ok(())
            }),
        )
        .unwrap();

        let second = order.clone();
        bus.subscribe(
            "job:done",
            handler(move |_| {
                second.lock().push("literal");
                Ok(())
            }),
        )
        .unwrap();

        bus.publish("job:done", &payload(())).unwrap();
        assert_eq!(*order.lock(), vec!["wildcard", "literal"]);
    }

    #[test]
    fn publishing_a_wildcard_name_is_rejected() {
        let bus = EventBus::new();
        let result = bus.publish("job:*", &payload(()));
        assert!(matches!(result, Err(FluxonError::InvalidArgument(_))));
    }

    #[test]
    fn failing_handler_aborts_later_delivery() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        bus.subscribe("boom", handler(|_| anyhow::bail!("Belgium!")))
            .unwrap();
        bus.subscribe("boom", counting_handler(hits.clone())).unwrap();

        let result = bus.publish("boom", &payload(()));
        assert!(matches!(result, Err(FluxonError::HandlerFailed { .. })));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn reentrant_subscription_takes_effect_next_publish() {
        let bus = Arc::new(EventBus::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let bus_inner = bus.clone();
        let late = counting_handler(hits.clone());
        bus.subscribe(
            "grow",
            handler(move |_| {
                bus_inner.subscribe("grow", late.clone())?;
                Ok(())
            }),
        )
        .unwrap();

        bus.publish("grow", &payload(())).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        bus.publish("grow", &payload(())).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
