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
use derive_new::new;

use crate::common::Payload;
use crate::message::EventName;
use crate::traits::EventPayload;

/// The transient payload describing one [`Action`](crate::action::Action)
/// invocation, carried on all of its lifecycle events.
///
/// A scene starts life on the `pending` event with only `name` and `params`
/// filled. The same invocation's terminal event carries the scene again with
/// exactly one of the terminal slots populated: `result` on `succeeded`, `error`
/// on `failed`.
///
/// Handlers recover the concrete parameter and result types with
/// [`params_as`](Scene::params_as) and [`result_as`](Scene::result_as); `error`
/// is the failure's display string, kept stable and serializable on purpose (the
/// full error value travels only on the future the action call returns).
#[derive(Debug, Clone, new)]
pub struct Scene {
    /// The full name of the action in question.
    pub name: EventName,
    /// The parameters the action was invoked with.
    pub params: Payload,
    /// The value produced by a successful action, absent otherwise.
    #[new(default)]
    pub result: Option<Payload>,
    /// The failure message of a failed action, absent otherwise.
    #[new(default)]
    pub error: Option<String>,
}

impl Scene {
    /// Downcasts the invocation parameters to their concrete type.
    pub fn params_as<T: EventPayload>(&self) -> Option<&T> {
        (*self.params).as_any().downcast_ref::<T>()
    }

    /// Downcasts the result to its concrete type; `None` while the action is
    /// pending, failed, or when `T` is not the result type.
    pub fn result_as<T: EventPayload>(&self) -> Option<&T> {
        (**self.result.as_ref()?).as_any().downcast_ref::<T>()
    }

    pub(crate) fn with_result(mut self, result: Payload) -> Self {
        self.result = Some(result);
        self
    }

    pub(crate) fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}
