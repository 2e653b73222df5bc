//! Server-Sent Events: tells the gallery when the collection changed

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// SSE endpoint for page loads and fetch failures
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // A lagging client misses events; the next one still triggers a redraw
    let events = BroadcastStream::new(state.subscribe())
        .filter_map(|received| received.ok())
        .filter_map(|event| to_sse(&event).map(Ok));

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_sse(event: &ServerEvent) -> Option<Event> {
    match Event::default().event(event.name()).json_data(event) {
        Ok(sse) => Some(sse),
        Err(e) => {
            tracing::warn!("Dropping {} event: {}", event.name(), e);
            None
        }
    }
}
