use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::{Event, EventDispatcher, Session};

/// Spawn a task that owns `dispatcher` and `session` and applies events from
/// `events` one at a time, in order.
///
/// Producers on any thread send into the channel; only this task touches the
/// session. A failed dispatch is logged and the loop moves on. When every
/// sender is dropped the task ends and hands the session back.
pub fn spawn_event_loop(
    mut dispatcher: EventDispatcher,
    mut session: Session,
    mut events: mpsc::Receiver<Event>,
) -> JoinHandle<Session> {
    tokio::spawn(async move {
        info!("event loop started");
        while let Some(event) = events.recv().await {
            let category = event.category();
            if let Err(e) = dispatcher.dispatch(&mut session, event) {
                error!(event = category, error = %e, "event dispatch failed");
            }
        }
        info!("event channel closed, event loop stopping");
        session
    })
}
