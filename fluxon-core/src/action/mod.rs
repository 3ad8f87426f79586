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

//! Actions perform the bulk of the "work" around a user interaction.
//!
//! Any asynchronous logic (a server call, a computation) should live inside an
//! action, and the action should result in one or more changes to state. Those
//! changes are made through events broadcast on a dispatcher; an action never
//! mutates state itself.
//!
//! Materially speaking, an action is nothing more than an async function. This
//! module provides a decorator, [`make_action`], that announces the function's
//! lifecycle on the dispatcher so downstream stores can react to it.

pub use act::{make_action, Action};
pub use stage::ActionStage;

mod act;
mod stage;
