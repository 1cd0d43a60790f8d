//! `GET /events` — server-sent change notifications.
//!
//! Each event only says *what* changed (`phrases` or `uploads`); clients
//! re-query the list they are showing.

use crate::state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, stream};
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

pub async fn change_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notifier.subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(change) => {
                    let event = Event::default().event(change.name()).data(change.name());
                    return Some((Ok::<_, Infallible>(event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    // a re-query covers whatever was missed
                    debug!(skipped, "change subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
