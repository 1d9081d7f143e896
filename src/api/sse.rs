//! Server-Sent Events support

use crate::runtime::{SessionEvent, SessionSnapshot};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Stream an `init` snapshot followed by live session events
pub fn sse_stream(
    snapshot: SessionSnapshot,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(init_event(&snapshot)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(session_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_event(snapshot: &SessionSnapshot) -> Event {
    to_axum(
        "init",
        &json!({
            "type": "init",
            "messages": snapshot.messages,
            "busy": snapshot.busy
        }),
    )
}

fn session_event_to_axum(event: SessionEvent) -> Event {
    let (event_type, data) = match event {
        SessionEvent::Message { message } => (
            "message",
            json!({
                "type": "message",
                "message": message
            }),
        ),
        SessionEvent::StateChange { busy } => (
            "state_change",
            json!({
                "type": "state_change",
                "busy": busy
            }),
        ),
        SessionEvent::Cleared => ("cleared", json!({ "type": "cleared" })),
    };
    to_axum(event_type, &data)
}

fn to_axum(event_type: &'static str, data: &serde_json::Value) -> Event {
    Event::default().event(event_type).data(data.to_string())
}

