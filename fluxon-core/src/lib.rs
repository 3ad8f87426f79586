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

#![forbid(unsafe_code)]

//! Fluxon Core Library
//!
//! This library provides the core functionality for the Fluxon unidirectional
//! data-flow framework: the event bus and dispatcher, the action lifecycle
//! decorator, and the reactive store.
//!
//! Data flows one way: callers invoke an [`Action`](crate::action::Action); the
//! action announces its lifecycle on the [`Dispatcher`](crate::common::Dispatcher);
//! [`Store`](crate::common::Store)s registered with the dispatcher react by
//! mutating their own properties; those mutations raise store-local change
//! events for whatever presentation layer is watching.

/// Common structures used throughout the Fluxon framework.
pub(crate) mod common;

/// The action lifecycle decorator.
pub(crate) mod action;

/// Event naming, lifecycle payloads, and error types.
pub(crate) mod message;

/// Trait definitions used in the Fluxon framework.
pub(crate) mod traits;

/// Prelude module for convenient imports.
///
/// This module re-exports the commonly used items from the `common`, `message`,
/// `action`, and `traits` modules.
pub mod prelude {
    pub use crate::action::{make_action, Action, ActionStage};
    pub use crate::common::{
        change_event_for, handler, payload, Dispatcher, DispatcherRef, EventBus, FluxonConfig,
        Handler, JournalRef, NoopJournal, Payload, Store, TracingJournal, WorkFuture,
        CHANGE_EVENT,
    };
    pub use crate::message::{EventName, EventPattern, FluxonError, Scene, DELIMITER, WILDCARD};
    pub use crate::traits::{downcast_payload, Dispatch, DispatchJournal, EventPayload};
}
