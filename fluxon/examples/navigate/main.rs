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

use std::sync::Arc;

use anyhow::Context;
use serde_json::{json, Value};

use fluxon::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("fluxon_core=debug").init();

    // one dispatcher per application; the TracingJournal logs every dispatch
    let dispatcher = Dispatcher::with_journal(Arc::new(TracingJournal));

    // the action does the "work", here just echoing the destination back
    let navigate = dispatcher.create_action("navigate", |to: String| async move {
        println!("... navigating to '{to}'");
        Ok::<_, anyhow::Error>(to)
    })?;

    // the store holds the state and reacts to the action's lifecycle
    let app = dispatcher.create_store(None);
    app.define("state", json!("splash"))?
        .handle("navigate:succeeded", |store, payload| {
            let scene = downcast_payload::<Scene>(payload).context("expected a scene payload")?;
            let to = scene.result_as::<String>().context("expected a string result")?;
            store.set("state", json!(to))?;
            Ok(())
        })?;

    // a presentation layer watches the store, not the dispatcher
    app.subscribe(
        &change_event_for("state"),
        handler(|payload| {
            let state = downcast_payload::<Value>(payload).context("expected a json payload")?;
            println!("screen is now {state}");
            Ok(())
        }),
    )?;

    println!("starting on {}", app.get("state").unwrap_or_default());
    navigate.call("login".to_string()).await?;
    navigate.call("dashboard".to_string()).await?;

    // change notifications land on the next turn of the event loop
    app.settled().await;
    println!("finished on {}", app.get("state").unwrap_or_default());

    Ok(())
}
