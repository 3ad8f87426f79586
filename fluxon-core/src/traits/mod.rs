//! Defines the core traits that establish the fundamental contracts of the Fluxon framework.
//!
//! This module aggregates the essential traits that define the capabilities and interactions
//! within a Fluxon application. These traits ensure composability and provide a clear
//! interface for event payloads, the dispatch capability, and the dispatch journal.
//!
//! # Key Traits
//!
//! *   [`EventPayload`]: A marker trait required for all values carried on dispatched events.
//!     Ensures payloads are `Send`, `Sync`, `Debug`, and support downcasting via `Any`.
//! *   [`Dispatch`]: The capability set a dispatcher exposes to its collaborators,
//!     registering, unregistering, and dispatching named events. Actions and Stores depend
//!     on this trait rather than on the concrete [`Dispatcher`](crate::common::Dispatcher),
//!     which keeps them testable against doubles.
//! *   [`DispatchJournal`]: The injectable logging capability recording every dispatch
//!     before its handlers run.

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

// --- Public Re-exports ---
pub use dispatch::Dispatch;
pub use dispatch_journal::DispatchJournal;
pub use event_payload::{downcast_payload, EventPayload};

// --- Submodules ---

/// Defines the [`Dispatch`] capability trait.
mod dispatch;
/// Defines the [`DispatchJournal`] logging capability.
mod dispatch_journal;
/// Defines the [`EventPayload`] marker trait.
mod event_payload;
