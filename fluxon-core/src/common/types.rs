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

//! Defines common type aliases and small constructors used throughout `fluxon-core`.
//!
//! This module centralizes the type-erased payload and handler shapes so the rest
//! of the crate (and downstream code) reads in terms of `Payload` and `Handler`
//! rather than their `Arc<dyn ...>` spellings.

use std::sync::Arc;

use futures::future::BoxFuture;
use static_assertions::assert_impl_all;

use crate::common::{Dispatcher, Store};
use crate::traits::{Dispatch, DispatchJournal, EventPayload};

/// A type-erased event payload, shared by reference between handlers.
pub type Payload = Arc<dyn EventPayload>;

/// A registered event handler.
///
/// Handlers run synchronously during dispatch and report failure through their
/// return value; a failing handler aborts delivery to later handlers of the same
/// event. The `Arc` is the handler's identity:
/// [`unregister`](crate::traits::Dispatch::unregister) removes by allocation, so
/// keep a clone of the `Arc` you registered.
pub type Handler = Arc<dyn Fn(&Payload) -> anyhow::Result<()> + Send + Sync>;

/// A shared reference to any dispatch-capable collaborator.
///
/// Mirrors what actions and stores hold: the capability, not the concrete
/// [`Dispatcher`].
pub type DispatcherRef = Arc<dyn Dispatch>;

/// A shared reference to a dispatch journal implementation.
pub type JournalRef = Arc<dyn DispatchJournal>;

/// The boxed future an action's unit of work resolves to.
pub type WorkFuture<R> = BoxFuture<'static, anyhow::Result<R>>;

/// Wraps a value into a type-erased [`Payload`].
pub fn payload<T: EventPayload>(value: T) -> Payload {
    Arc::new(value)
}

/// Wraps a closure into a registrable [`Handler`].
///
/// Keep a clone of the returned `Arc` if you intend to unregister it later.
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Payload) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

assert_impl_all!(Dispatcher: Send, Sync, Clone);
assert_impl_all!(Store: Send, Sync, Clone);
