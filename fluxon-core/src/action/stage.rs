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
use std::fmt;

/// The lifecycle stage of one action invocation, used as the suffix of the
/// dispatched event name (`"<action>:pending"` and so on).
///
/// Every invocation dispatches `Pending` exactly once, then exactly one of the
/// two terminal stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStage {
    /// The action has started, but has yet to complete.
    Pending,
    /// The action has completed.
    Succeeded,
    /// The action has failed.
    Failed,
}

impl ActionStage {
    /// The event-name suffix for this stage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionStage::Pending => "pending",
            ActionStage::Succeeded => "succeeded",
            ActionStage::Failed => "failed",
        }
    }
}

impl fmt::Display for ActionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
