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
use tracing::{debug, info, trace};

use crate::common::config::CONFIG;
use crate::common::Payload;
use crate::message::EventName;
use crate::traits::DispatchJournal;

/// The default dispatch journal: records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopJournal;

impl DispatchJournal for NoopJournal {
    fn record(&self, _name: &EventName, _payload: &Payload) {}
}

/// A dispatch journal that records through the `tracing` subscriber.
///
/// The record level comes from `CONFIG.tracing.journal_level`; the journal is
/// silenced entirely when `CONFIG.behavior.journal` is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingJournal;

impl DispatchJournal for TracingJournal {
    fn record(&self, name: &EventName, payload: &Payload) {
        if !CONFIG.behavior.journal {
            return;
        }
        match CONFIG.tracing.journal_level.as_str() {
            "info" => info!(event = %name, payload = ?payload, "dispatch"),
            "debug" => debug!(event = %name, payload = ?payload, "dispatch"),
            _ => trace!(event = %name, payload = ?payload, "dispatch"),
        }
    }
}
