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

use anyhow::Context;
use serde_json::{json, Value};

use fluxon::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let dispatcher = Dispatcher::new();

    let increment = dispatcher.create_action("increment", |by: u64| async move {
        Ok::<_, anyhow::Error>(by)
    })?;

    let counter = dispatcher.create_store(None);
    counter
        .define("count", json!(0))?
        .handle("increment:succeeded", |store, payload| {
            let scene = downcast_payload::<Scene>(payload).context("expected a scene payload")?;
            let by = *scene.result_as::<u64>().context("expected a u64 result")?;
            store.update("count", |value| {
                let next = value.as_u64().unwrap_or(0) + by;
                *value = json!(next);
            })?;
            Ok(())
        })?;

    counter.subscribe(
        &change_event_for("count"),
        handler(|payload| {
            let count = downcast_payload::<Value>(payload).context("expected a json payload")?;
            println!("count -> {count}");
            Ok(())
        }),
    )?;

    for by in [1, 2, 39] {
        increment.call(by).await?;
    }

    counter.settled().await;
    println!("final: {}", counter.get("count").unwrap_or_default());
    Ok(())
}
