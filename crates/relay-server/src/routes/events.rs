use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::state::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub session_id: Option<String>,
}

/// GET /api/events: SSE stream of new chat turns, snapshots and pending
/// actions, optionally narrowed to one session. Events missed while a client
/// lags are dropped.
pub async fn sse_events(
    State(app): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> impl axum::response::IntoResponse {
    let rx = app.events().subscribe();
    let stream = BroadcastStream::new(rx).filter_map(move |msg| {
        let event = msg.ok()?;
        if let Some(session_id) = &query.session_id {
            if event.session_id() != session_id {
                return None;
            }
        }
        Event::default()
            .event(event.name())
            .json_data(&event)
            .ok()
            .map(Ok::<Event, Infallible>)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
