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
use std::future::Future;
use std::sync::Arc;

use tracing::{error, instrument, trace};

use crate::action::ActionStage;
use crate::common::{DispatcherRef, Payload, WorkFuture};
use crate::message::{EventName, FluxonError, Scene};
use crate::traits::EventPayload;

/// The stored unit of work: parameters in, boxed settlement future out.
type Work<P, R> = Arc<dyn Fn(P) -> WorkFuture<R> + Send + Sync>;

/// A unit of work decorated with dispatcher lifecycle events.
///
/// Created through [`make_action`] or
/// [`Dispatcher::create_action`](crate::common::Dispatcher::create_action).
/// The action itself is stateless between invocations: each
/// [`call`](Action::call) produces a fresh [`Scene`] describing that one
/// invocation.
///
/// Stores listen on the action's `name` with three suffixes:
///
/// - `<name>:pending`: the work has started, but has yet to complete.
/// - `<name>:succeeded`: the work completed; the scene carries its result.
/// - `<name>:failed`: the work failed; the scene carries the failure message.
pub struct Action<P, R> {
    name: EventName,
    dispatcher: DispatcherRef,
    work: Work<P, R>,
}

impl<P, R> Clone for Action<P, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            dispatcher: self.dispatcher.clone(),
            work: self.work.clone(),
        }
    }
}

impl<P, R> Debug for Action<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

/// Decorates `work` with the lifecycle events most important for downstream
/// stores listening through `dispatcher`.
///
/// `work` receives exactly one argument (the parameters value) and resolves
/// to the invocation's outcome. For simple association between actions and
/// stores, pack everything the work needs into that one value.
///
/// # Errors
///
/// Returns [`FluxonError::InvalidArgument`] when `name` is empty or contains a
/// wildcard segment. Validation happens here, at construction; `call` never
/// revalidates.
pub fn make_action<P, R, F, Fut>(
    dispatcher: DispatcherRef,
    name: &str,
    work: F,
) -> Result<Action<P, R>, FluxonError>
where
    P: EventPayload + Clone,
    R: EventPayload + Clone,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    let name = EventName::new(name)?;
    if !name.is_concrete() {
        return Err(FluxonError::InvalidArgument(format!(
            "action name must be concrete: '{name}'"
        )));
    }
    Ok(Action {
        name,
        dispatcher,
        work: Arc::new(move |params| -> WorkFuture<R> { Box::pin(work(params)) }),
    })
}

impl<P, R> Action<P, R>
where
    P: EventPayload + Clone,
    R: EventPayload + Clone,
{
    /// The full name of this action.
    pub fn name(&self) -> &EventName {
        &self.name
    }

    /// Invokes the decorated work with `params`.
    ///
    /// Dispatches `<name>:pending` synchronously before the work starts, then
    /// awaits the work and dispatches exactly one of `<name>:succeeded` or
    /// `<name>:failed` once it settles. All three events carry the invocation's
    /// [`Scene`]. The returned future resolves to the same outcome as the work,
    /// so callers can observe completion directly without going through the
    /// dispatcher.
    ///
    /// A work failure, whether the work errors before its first await or
    /// during later asynchronous steps, is never thrown past this method's
    /// lifecycle handling: it becomes the `failed` dispatch plus the `Err` this
    /// future resolves to.
    ///
    /// # Errors
    ///
    /// A handler failing during the `pending` dispatch aborts the invocation
    /// before the work starts and is returned as the call error. Handler
    /// failures during the terminal dispatch are logged and do not override
    /// the work's outcome.
    #[instrument(skip(self, params), fields(action = %self.name))]
    pub async fn call(&self, params: P) -> anyhow::Result<R> {
        let scene = Scene::new(self.name.clone(), Arc::new(params.clone()) as Payload);

        let pending = self.name.suffixed(ActionStage::Pending.as_str());
        self.dispatcher
            .dispatch(pending.as_str(), Arc::new(scene.clone()))?;

        match (self.work)(params).await {
            Ok(result) => {
                trace!(action = %self.name, "work succeeded");
                let scene = scene.with_result(Arc::new(result.clone()) as Payload);
                let succeeded = self.name.suffixed(ActionStage::Succeeded.as_str());
                if let Err(err) = self.dispatcher.dispatch(succeeded.as_str(), Arc::new(scene)) {
                    error!(action = %self.name, error = %err, "succeeded handler failed");
                }
                Ok(result)
            }
            Err(err) => {
                trace!(action = %self.name, error = %err, "work failed");
                let scene = scene.with_error(err.to_string());
                let failed = self.name.suffixed(ActionStage::Failed.as_str());
                if let Err(dispatch_err) =
                    self.dispatcher.dispatch(failed.as_str(), Arc::new(scene))
                {
                    error!(action = %self.name, error = %dispatch_err, "failed handler failed");
                }
                Err(err)
            }
        }
    }
}
