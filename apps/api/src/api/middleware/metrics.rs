use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::state::AppState;

/// Label used for requests that matched no route
const UNMATCHED_PATH: &str = "unmatched";

/// Records the count and latency of every request
///
/// Requests are labelled by their route template so that path parameters do
/// not create a series per PVZ.
pub async fn track_metrics(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned());

    let response = next.run(req).await;

    state.metrics.record_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        start.elapsed(),
    );
    response
}
