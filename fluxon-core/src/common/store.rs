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

//! The reactive property container holding one domain of application state.
//!
//! Stores subscribe to updates from Actions through the Dispatcher, and announce
//! their own mutations on a store-local bus. Two kinds of change events fire for
//! every mutation:
//!
//! - `change`: some value on this store changed; the store itself is the payload.
//! - `change:<key>`: `<key>` changed; the new value is the payload.
//!
//! Notifications are deferred to the next turn of the event loop, so a batch of
//! synchronous writes inside one handler is observed only after that handler
//! returns, but every write still produces its own pair of notifications.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use tokio::sync::Notify;
use tracing::{error, instrument, trace};

use crate::common::{DispatcherRef, EventBus, Handler, Payload};
use crate::message::FluxonError;

/// The event announcing that some property of a store changed.
pub const CHANGE_EVENT: &str = "change";

/// Returns the keyed change event name for `key`, i.e. `"change:<key>"`.
pub fn change_event_for(key: &str) -> String {
    format!("{CHANGE_EVENT}:{key}")
}

/// A reactive, serializable bag of named properties.
///
/// A store is a cloneable handle; clones share the same property table,
/// change subscribers, and dispatcher binding. Typical construction chains
/// property definitions and dispatcher handlers in one expression:
///
/// ```rust,ignore
/// let app = dispatcher.create_store(None);
/// app.define("state", json!("splash"))?
///     .handle("navigate:succeeded", |store, payload| {
///         let scene = downcast_payload::<Scene>(payload).context("scene payload")?;
///         let destination = scene.result_as::<String>().context("string result")?;
///         store.set("state", json!(destination))?;
///         Ok(())
///     })?;
/// ```
///
/// [`define`](Store::define) is silent; [`set`](Store::set) and
/// [`update`](Store::update) defer their `change`/`change:<key>` notifications
/// to the next turn of the event loop and therefore require a running tokio
/// runtime. Under a multi-threaded runtime a notification may begin on another
/// worker before the mutating call returns; the single-threaded (current-thread)
/// flavor observes the strict "after the current call stack unwinds" ordering.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    db: RwLock<PropertyTable>,
    changes: EventBus,
    dispatcher: RwLock<Option<DispatcherRef>>,
    pending: AtomicUsize,
    settled: Notify,
}

/// Key/value storage preserving definition order for serialization.
#[derive(Debug, Default)]
struct PropertyTable {
    order: Vec<String>,
    values: HashMap<String, Value>,
}

impl PropertyTable {
    fn insert(&mut self, key: &str, value: Value) {
        if !self.values.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.values.insert(key.to_string(), value);
    }

    fn value_mut(&mut self, key: &str) -> &mut Value {
        if !self.values.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.values.entry(key.to_string()).or_insert(Value::Null)
    }

    fn snapshot(&self) -> Map<String, Value> {
        self.order
            .iter()
            .map(|key| (key.clone(), self.values[key].clone()))
            .collect()
    }
}

fn validate_key(key: &str) -> Result<(), FluxonError> {
    if key.is_empty() {
        return Err(FluxonError::InvalidArgument("missing property key".into()));
    }
    Ok(())
}

impl Store {
    /// Creates an empty store with no dispatcher binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `properties`. No change events fire
    /// for initial values.
    pub fn with_properties(properties: Map<String, Value>) -> Self {
        let store = Self::new();
        {
            let mut db = store.inner.db.write();
            for (key, value) in properties {
                db.insert(&key, value);
            }
        }
        store
    }

    /// Defines the property `key`, overwriting any current value. Never fires a
    /// change event, even on overwrite. Returns `&Self` for cascading.
    ///
    /// Pass `None::<Value>` to register a key without giving it a value yet
    /// (it reads back as `Value::Null`).
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `key` is empty.
    pub fn define(
        &self,
        key: &str,
        value: impl Into<Option<Value>>,
    ) -> Result<&Self, FluxonError> {
        validate_key(key)?;
        let value = value.into().unwrap_or(Value::Null);
        self.inner.db.write().insert(key, value);
        Ok(self)
    }

    /// Returns the current value of `key`, or `None` when the key was never
    /// defined.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.db.read().values.get(key).cloned()
    }

    /// Whether `key` has ever been defined or set, regardless of its value.
    pub fn has(&self, key: &str) -> bool {
        self.inner.db.read().values.contains_key(key)
    }

    /// Sets `key` to `value`, defining the key if absent, and schedules exactly
    /// one `change` and one `change:<key>` notification on the next turn of the
    /// event loop, even when the new value equals the old one. Returns `&Self`
    /// for cascading.
    ///
    /// Must be called within a tokio runtime context.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `key` is empty.
    #[instrument(skip(self, value))]
    pub fn set(&self, key: &str, value: Value) -> Result<&Self, FluxonError> {
        validate_key(key)?;
        self.inner.db.write().insert(key, value.clone());
        self.queue_notification(key, value);
        Ok(self)
    }

    /// Mutates the current value of `key` in place through `mutator`, then
    /// schedules the same deferred notifications as [`set`](Store::set). An
    /// absent key is defined first, presenting `mutator` with `Value::Null`.
    /// Returns `&Self` for cascading.
    ///
    /// Must be called within a tokio runtime context.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `key` is empty.
    #[instrument(skip(self, mutator))]
    pub fn update<F>(&self, key: &str, mutator: F) -> Result<&Self, FluxonError>
    where
        F: FnOnce(&mut Value),
    {
        validate_key(key)?;
        let notified = {
            let mut db = self.inner.db.write();
            mutator(db.value_mut(key));
            db.values[key].clone()
        };
        self.queue_notification(key, notified);
        Ok(self)
    }

    /// Attaches (or replaces) this store's dispatcher binding. The store only
    /// uses the dispatcher to register handlers; it does not manage its
    /// lifecycle. Returns `&Self` for cascading.
    pub fn bind_dispatcher(&self, dispatcher: DispatcherRef) -> &Self {
        *self.inner.dispatcher.write() = Some(dispatcher);
        self
    }

    /// Returns the bound dispatcher, if any.
    pub fn dispatcher(&self) -> Option<DispatcherRef> {
        self.inner.dispatcher.read().clone()
    }

    /// Registers `f` on the bound dispatcher under `event_name`, with this
    /// store as the receiver. Returns `&Self` for cascading.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::PreconditionFailed`] when no dispatcher is bound,
    /// and [`FluxonError::InvalidArgument`] when `event_name` is empty.
    pub fn handle<F>(&self, event_name: &str, f: F) -> Result<&Self, FluxonError>
    where
        F: Fn(&Store, &Payload) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let dispatcher = self.dispatcher().ok_or_else(|| {
            FluxonError::PreconditionFailed("no dispatcher bound to this store".into())
        })?;
        let receiver = self.clone();
        let handler: Handler = Arc::new(move |payload| f(&receiver, payload));
        dispatcher.register(event_name, handler)?;
        Ok(self)
    }

    /// Subscribes `handler` to this store's local change events
    /// ([`CHANGE_EVENT`] or a [`change_event_for`] name). Returns `&Self` for
    /// cascading.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    pub fn subscribe(&self, name: &str, handler: Handler) -> Result<&Self, FluxonError> {
        self.inner.changes.subscribe(name, handler)?;
        Ok(self)
    }

    /// Removes one change-event subscription by handler allocation; a no-op
    /// when none matches. Returns `&Self` for cascading.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    pub fn unsubscribe(&self, name: &str, handler: &Handler) -> Result<&Self, FluxonError> {
        self.inner.changes.unsubscribe(name, handler)?;
        Ok(self)
    }

    /// Returns a shallow snapshot of all defined properties, in definition
    /// order. Mutating the snapshot does not affect the store, and later store
    /// mutations do not affect the snapshot.
    pub fn to_object(&self) -> Map<String, Value> {
        self.inner.db.read().snapshot()
    }

    /// Restores properties from a snapshot value.
    ///
    /// `Value::Null` is a no-op. An object defines every contained key through
    /// the silent [`define`](Store::define) path, so restoring a snapshot raises
    /// no change events. Returns `&Self` for cascading.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] for any non-object,
    /// non-null snapshot.
    pub fn from_object(&self, snapshot: &Value) -> Result<&Self, FluxonError> {
        match snapshot {
            Value::Null => Ok(self),
            Value::Object(properties) => {
                for (key, value) in properties {
                    self.define(key, value.clone())?;
                }
                Ok(self)
            }
            other => Err(FluxonError::InvalidArgument(format!(
                "snapshot must be an object, got {other}"
            ))),
        }
    }

    /// Resolves once no deferred change notifications are pending on this
    /// store. Purely an observation aid; there is no way to cancel a pending
    /// notification.
    pub async fn settled(&self) {
        loop {
            let notified = self.inner.settled.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.inner.pending.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Spawns the deferred `change` + `change:<key>` pair for one mutation.
    fn queue_notification(&self, key: &str, value: Value) {
        let store = self.clone();
        let key = key.to_string();
        self.inner.pending.fetch_add(1, Ordering::SeqCst);
        trace!(key = %key, "queueing change notification");
        tokio::spawn(async move {
            let store_payload: Payload = Arc::new(store.clone());
            if let Err(err) = store.inner.changes.publish(CHANGE_EVENT, &store_payload) {
                error!(error = %err, "change handler failed");
            }
            let keyed = change_event_for(&key);
            let value_payload: Payload = Arc::new(value);
            if let Err(err) = store.inner.changes.publish(&keyed, &value_payload) {
                error!(event = %keyed, error = %err, "keyed change handler failed");
            }
            if store.inner.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
                store.inner.settled.notify_waiters();
            }
        });
    }
}

/// Serializes exactly the defined properties, in definition order: the same
/// mapping [`to_object`](Store::to_object) returns.
impl Serialize for Store {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_object().serialize(serializer)
    }
}
