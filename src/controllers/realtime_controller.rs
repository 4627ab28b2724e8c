use std::{convert::Infallible, time::Duration};

use axum::{
    extract::{Extension, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{Stream, StreamExt};
use mongodb::bson::oid::ObjectId;
use tokio::sync::broadcast::{error::RecvError, Receiver};

use crate::{models::CurrentUser, AppState};

/// Event names addressed to `user_id`. Events owned by other users are skipped.
pub fn user_events(
    rx: Receiver<(ObjectId, String)>,
    user_id: ObjectId,
) -> impl Stream<Item = String> {
    futures_util::stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok((owner, name)) if owner == user_id => return Some((name, rx)),
                Ok(_) => continue,
                Err(RecvError::Lagged(n)) => {
                    tracing::debug!(skipped = n, "event stream lagged");
                    return Some(("ping".to_string(), rx));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

// GET /events  (SSE)
pub async fn sse_events(
    State(state): State<AppState>,
    Extension(u): Extension<CurrentUser>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!(user = %u.id.to_hex(), "event stream opened");

    let stream = user_events(state.events_tx.subscribe(), u.id)
        .map(|name| Ok(Event::default().event(name).data("1")));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(20))
            .text("keep-alive"),
    )
}
