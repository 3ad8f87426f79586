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
#![forbid(missing_docs)] // Keep this to enforce coverage

//! # Fluxon
//!
//! This crate provides a unidirectional data-flow core for event-driven
//! applications, built on top of Tokio. It separates *intent* from *state*
//! behind a central broker with clear, synchronous delivery guarantees.
//!
//! ## Key Concepts
//!
//! - **Dispatcher**: the central synchronous publish-subscribe broker. Handlers
//!   subscribe to `:`-delimited event names, optionally with `*` wildcard
//!   segments, and run in registration order before `dispatch` returns.
//! - **Actions (`Action`, `make_action`)**: decorated units of (possibly
//!   asynchronous) work that announce their lifecycle (`pending`, then
//!   `succeeded` or `failed`) as dispatched events carrying a `Scene`.
//! - **Stores (`Store`)**: reactive bags of named properties. Mutations raise a
//!   deferred `change` event and a property-scoped `change:<key>` event; stores
//!   serialize to (and restore from) shallow snapshots.
//! - **Capabilities (`Dispatch`, `DispatchJournal`, `EventPayload`)**: the
//!   traits the collaborators actually depend on, keeping every seam
//!   substitutable in tests.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fluxon::prelude::*;
//! use serde_json::json;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let dispatcher = Dispatcher::new();
//!
//! let navigate = dispatcher.create_action("navigate", |to: String| async move {
//!     Ok::<_, anyhow::Error>(to)
//! })?;
//!
//! let app = dispatcher.create_store(None);
//! app.define("state", json!("splash"))?
//!     .handle("navigate:succeeded", |store, payload| {
//!         let scene = downcast_payload::<Scene>(payload).expect("scene payload");
//!         let to = scene.result_as::<String>().expect("string result");
//!         store.set("state", json!(to))?;
//!         Ok(())
//!     })?;
//!
//! navigate.call("login".to_string()).await?;
//! app.settled().await;
//! assert_eq!(app.get("state"), Some(json!("login")));
//! # Ok(())
//! # }
//! ```

/// A prelude module for conveniently importing the most commonly used items.
///
/// Re-exports everything from [`fluxon_core::prelude`]: the dispatcher, store,
/// action decorator, capability traits, event-name types, and the payload and
/// handler helpers.
pub mod prelude {
    pub use fluxon_core::prelude::*;
}
