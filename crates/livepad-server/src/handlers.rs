//! Route handlers and error mapping.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use livepad_core::{Error, Playground, Served};
use livepad_util::hash::etag;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Build the router over a shared pipeline.
pub fn router(playground: Playground) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/serve/:sid", get(serve_page))
        .route("/serve/:sid/:name", get(serve_module))
        .route("/save/:sid/:name", post(save))
        .layer(TraceLayer::new_for_http())
        .with_state(playground)
}

async fn ping() -> &'static str {
    "pong"
}

/// `POST /save/{sid}/{name}` with the full source as the raw body.
async fn save(
    State(playground): State<Playground>,
    Path((sid, name)): Path<(String, String)>,
    source: String,
) -> Response {
    let pad = playground.clone();
    let task = tokio::task::spawn_blocking(move || pad.save(&sid, &name, &source));

    match task.await {
        Ok(Ok(())) => (StatusCode::OK, "ok").into_response(),
        Ok(Err(err)) => error_response(&playground, &err),
        Err(join_err) => {
            error!(error = %join_err, "save task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

/// `GET /serve/{sid}`: the host page.
async fn serve_page(
    State(playground): State<Playground>,
    Path(sid): Path<String>,
    headers: HeaderMap,
) -> Response {
    resolve(playground, sid, None, &headers).await
}

/// `GET /serve/{sid}/{name}`: a module.
async fn serve_module(
    State(playground): State<Playground>,
    Path((sid, name)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    resolve(playground, sid, Some(name), &headers).await
}

async fn resolve(
    playground: Playground,
    sid: String,
    name: Option<String>,
    headers: &HeaderMap,
) -> Response {
    let pad = playground.clone();
    // A miss on the entry module compiles the default, so this may be CPU work.
    let task = tokio::task::spawn_blocking(move || pad.serve(&sid, name.as_deref()));

    match task.await {
        Ok(Ok(served)) => content_response(served, headers),
        Ok(Err(err)) => error_response(&playground, &err),
        Err(join_err) => {
            error!(error = %join_err, "serve task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

fn content_response(served: Served, headers: &HeaderMap) -> Response {
    let tag = etag(served.body.as_bytes());
    let tag_value = HeaderValue::from_str(&tag).ok();

    if if_none_match(headers, &tag) {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        if let Some(value) = tag_value {
            response.headers_mut().insert(header::ETAG, value);
        }
        return response;
    }

    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, served.kind.content_type()),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        served.body,
    )
        .into_response();
    if let Some(value) = tag_value {
        response.headers_mut().insert(header::ETAG, value);
    }
    response
}

/// Whether the request's `If-None-Match` already names `tag`.
fn if_none_match(headers: &HeaderMap, tag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| {
            candidate == "*" || candidate == tag || candidate.strip_prefix("W/") == Some(tag)
        })
}

fn error_response(playground: &Playground, err: &Error) -> Response {
    let status = match err {
        Error::Compile(_) => StatusCode::BAD_REQUEST,
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if err.is_client_error() {
        warn!(%status, error = %err, "request rejected");
    } else {
        error!(%status, error = %err, "request failed");
    }

    (status, playground.describe(err)).into_response()
}
