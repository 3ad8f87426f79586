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

//! Common structures used throughout the Fluxon framework: the event bus, the
//! dispatcher, the store, journals, configuration, and shared type aliases.

pub use config::FluxonConfig;
pub use dispatcher::Dispatcher;
pub use event_bus::EventBus;
pub use journal::{NoopJournal, TracingJournal};
pub use store::{change_event_for, Store, CHANGE_EVENT};
pub use types::{handler, payload, DispatcherRef, Handler, JournalRef, Payload, WorkFuture};

pub(crate) mod config;
mod dispatcher;
mod event_bus;
mod journal;
mod store;
pub(crate) mod types;
