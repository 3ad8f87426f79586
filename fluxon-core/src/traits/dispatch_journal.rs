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

use crate::common::Payload;
use crate::message::EventName;

/// The injectable logging capability of a [`Dispatcher`](crate::common::Dispatcher).
///
/// A journal observes every dispatch exactly once, after the event name has been
/// validated and before any handler runs. Implementations must not assume handlers
/// will run to completion afterwards: a failing handler aborts delivery but the
/// dispatch has already been recorded.
///
/// The default journal is [`NoopJournal`](crate::common::NoopJournal);
/// [`TracingJournal`](crate::common::TracingJournal) records through the `tracing`
/// subscriber instead.
pub trait DispatchJournal: Send + Sync + Debug {
    /// Records one dispatch of `name` carrying `payload`.
    fn record(&self, name: &EventName, payload: &Payload);
}
