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
use std::any::Any;
use std::fmt::Debug;

use crate::common::Payload;

/// A marker trait for types that can travel as the payload of a dispatched event.
///
/// This trait combines the standard library traits (`Any`, `Send`, `Sync`, `Debug`)
/// needed for payloads to cross task boundaries and to be debuggable, while `as_any`
/// supports downcasting a type-erased payload back to its concrete type inside a
/// handler.
///
/// A blanket implementation is provided, so any type `T` that satisfies the bounds
/// (`T: Any + Send + Sync + Debug`) automatically implements `EventPayload`. Users
/// typically never implement this trait by hand.
pub trait EventPayload: Any + Send + Sync + Debug {
    /// Returns a reference to the payload as a dynamic [`Any`] trait object.
    ///
    /// This allows for runtime type introspection and downcasting using methods like
    /// [`Any::downcast_ref`](std::any::Any::downcast_ref).
    fn as_any(&self) -> &dyn Any;
}

/// Blanket implementation of `EventPayload` for qualifying types.
impl<T> EventPayload for T
where
    T: Any + Send + Sync + Debug,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Downcasts a type-erased [`Payload`] to a reference of its concrete type.
///
/// Returns `None` when the payload is not a `T`. The explicit deref through the
/// `Arc` matters here: calling `as_any` on the `Arc` itself would hand back the
/// smart pointer, not the payload it carries.
///
/// # Example
///
/// ```rust,ignore
/// let payload: Payload = Arc::new(42_u32);
/// assert_eq!(downcast_payload::<u32>(&payload), Some(&42));
/// ```
pub fn downcast_payload<T: EventPayload>(payload: &Payload) -> Option<&T> {
    (**payload).as_any().downcast_ref::<T>()
}
