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

use crate::common::{Handler, Payload};
use crate::message::FluxonError;

/// The capability to route named events to registered handlers.
///
/// This is the full surface an [`Action`](crate::action::Action) or
/// [`Store`](crate::common::Store) needs from its dispatcher. The concrete
/// [`Dispatcher`](crate::common::Dispatcher) implements it; tests may substitute
/// any other implementor (a recording double, a filtering decorator) without the
/// collaborators noticing.
///
/// The trait is object-safe: collaborators hold a
/// [`DispatcherRef`](crate::common::DispatcherRef) (`Arc<dyn Dispatch>`) and never
/// a concrete type.
pub trait Dispatch: Send + Sync + Debug {
    /// Registers `handler` to be invoked for events matching `name`.
    ///
    /// `name` may contain wildcard segments (`*`), each matching exactly one
    /// concrete segment of a dispatched event name.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    fn register(&self, name: &str, handler: Handler) -> Result<(), FluxonError>;

    /// Removes one prior registration of `handler` under `name`, matched by
    /// allocation identity. Silently does nothing when no registration matches.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty.
    fn unregister(&self, name: &str, handler: &Handler) -> Result<(), FluxonError>;

    /// Synchronously delivers `payload` to every handler whose pattern matches
    /// `name`, in registration order, before returning.
    ///
    /// # Errors
    ///
    /// Returns [`FluxonError::InvalidArgument`] when `name` is empty or contains a
    /// wildcard segment, and [`FluxonError::HandlerFailed`] when a handler errors
    /// (delivery to later handlers is aborted).
    fn dispatch(&self, name: &str, payload: Payload) -> Result<(), FluxonError>;
}
