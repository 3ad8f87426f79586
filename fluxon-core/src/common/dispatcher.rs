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
use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{instrument, trace};

use crate::action::{make_action, Action};
use crate::common::{EventBus, Handler, JournalRef, NoopJournal, Payload, Store};
use crate::message::{EventName, FluxonError};
use crate::traits::{Dispatch, EventPayload};

/// The central synchronous publish/subscribe broker between Actions and Stores.
///
/// A dispatcher manages the many-to-many relationship between intent and state:
/// Actions announce their lifecycle through [`dispatch`](Dispatcher::dispatch),
/// and Stores listen through handlers registered with
/// [`register`](Dispatcher::register). Because of this role, convenience
/// factories for both collaborators live directly on the dispatcher
/// ([`create_action`](Dispatcher::create_action),
/// [`create_store`](Dispatcher::create_store)).
///
/// One dispatcher per application is the common arrangement, but nothing
/// requires it; dispatchers can be made domain-specific. The handle is
/// cloneable; clones share the same subscriber registry and journal for the
/// life of the application.
///
/// Every dispatch is recorded on the injected
/// [`DispatchJournal`](crate::traits::DispatchJournal) (a no-op by default)
/// before any handler runs.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    bus: Arc<EventBus>,
    journal: JournalRef,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with an empty registry and the no-op journal.
    pub fn new() -> Self {
        Self::with_journal(Arc::new(NoopJournal))
    }

    /// Creates a dispatcher recording through `journal`.
    pub fn with_journal(journal: JournalRef) -> Self {
        Self {
            bus: Arc::new(EventBus::new()),
            journal,
        }
    }

    /// Registers `handler` to be called for `name` events. Returns `&Self`
    /// for cascading.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    #[instrument(skip(self, handler))]
    pub fn register(&self, name: &str, handler: Handler) -> Result<&Self, FluxonError> {
        self.bus.subscribe(name, handler)?;
        Ok(self)
    }

    /// Unregisters a previously-registered `handler`: it will no longer be
    /// called for subsequent `name` events. One registration is removed per
    /// call, matched by handler allocation; a no-op when none matches. Returns
    /// `&Self` for cascading.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    #[instrument(skip(self, handler))]
    pub fn unregister(&self, name: &str, handler: &Handler) -> Result<&Self, FluxonError> {
        self.bus.unsubscribe(name, handler)?;
        Ok(self)
    }

    /// Dispatches a `name` event carrying `payload` to all registered handlers
    /// whose pattern matches, in registration order, before returning. Returns
    /// `&Self` for cascading.
    ///
    /// The dispatch is recorded on the journal after validation and before the
    /// first handler runs.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty or
    /// contains a wildcard segment, and [`FluxonError::HandlerFailed`] when a
    /// handler errors. A failing handler aborts delivery to handlers registered
    /// after it, so callers relying on later handlers must treat this as the
    /// hazard it is.
    #[instrument(skip(self, payload))]
    pub fn dispatch(&self, name: &str, payload: Payload) -> Result<&Self, FluxonError> {
        let event = EventName::new(name)?;
        if !event.is_concrete() {
            return Err(FluxonError::InvalidArgument(format!(
                "cannot dispatch a wildcard name: '{event}'"
            )));
        }
        self.journal.record(&event, &payload);
        trace!(event = %event, "dispatching");
        self.bus.publish_event(&event, &payload)?;
        Ok(self)
    }

    /// Returns a freshly-decorated [`Action`] with the provided `name` and
    /// `work`, bound to this dispatcher.
    ///
    /// See [`make_action`] for the lifecycle contract.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty or
    /// contains a wildcard segment.
    pub fn create_action<P, R, F, Fut>(
        &self,
        name: &str,
        work: F,
    ) -> Result<Action<P, R>, FluxonError>
    where
        P: EventPayload + Clone,
        R: EventPayload + Clone,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        make_action(Arc::new(self.clone()), name, work)
    }

    /// Returns a freshly-created [`Store`] with the provided `properties`,
    /// bound to this dispatcher.
    ///
    /// See [`Store`] for more details.
    pub fn create_store(&self, properties: Option<Map<String, Value>>) -> Store {
        let store = match properties {
            Some(properties) => Store::with_properties(properties),
            None => Store::new(),
        };
        store.bind_dispatcher(Arc::new(self.clone()));
        store
    }

    /// Current number of registrations on this dispatcher's bus.
    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }
}

impl Dispatch for Dispatcher {
    fn register(&self, name: &str, handler: Handler) -> Result<(), FluxonError> {
        Dispatcher::register(self, name, handler).map(|_| ())
    }

    fn unregister(&self, name: &str, handler: &Handler) -> Result<(), FluxonError> {
        Dispatcher::unregister(self, name, handler).map(|_| ())
    }

    fn dispatch(&self, name: &str, payload: Payload) -> Result<(), FluxonError> {
        Dispatcher::dispatch(self, name, payload).map(|_| ())
    }
}
