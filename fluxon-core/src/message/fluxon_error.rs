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
/// Represents errors that can occur when registering, dispatching, or mutating
/// state in the data-flow core.
///
/// Construction-time validation failures (`InvalidArgument`, `PreconditionFailed`)
/// are always returned synchronously from the call that caused them, never
/// deferred and never converted into lifecycle events.
#[derive(Debug)]
pub enum FluxonError {
    /// A malformed argument: an empty event name, a wildcard in a dispatched
    /// name, an empty store key, or a non-object snapshot.
    InvalidArgument(String),
    /// An operation was invoked before its required collaborator was attached,
    /// e.g. [`Store::handle`](crate::common::Store::handle) without a bound
    /// dispatcher.
    PreconditionFailed(String),
    /// A handler returned an error during synchronous delivery. Delivery to
    /// handlers registered after the failing one was aborted.
    HandlerFailed {
        /// The event name being delivered when the handler failed.
        event: String,
        /// The handler's error.
        source: anyhow::Error,
    },
}

impl std::fmt::Display for FluxonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FluxonError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            FluxonError::PreconditionFailed(msg) => write!(f, "Precondition failed: {msg}"),
            FluxonError::HandlerFailed { event, source } => {
                write!(f, "Handler failed during '{event}': {source}")
            }
        }
    }
}

impl std::error::Error for FluxonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FluxonError::HandlerFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
