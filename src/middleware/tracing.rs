// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Creates one span per HTTP request carrying the x-request-id header value

use axum::body::Body;
use axum::http::{HeaderName, Request};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Create a tracing span for HTTP requests
#[must_use]
pub fn create_request_span<B>(request: &Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Assign a UUID `x-request-id` to requests that do not carry one
#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(request_id_header(), MakeRequestUuid)
}

/// Echo `x-request-id` back on the response
#[must_use]
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(request_id_header())
}

/// Request/response trace layer using [`create_request_span`]
#[must_use]
pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> tracing::Span,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(create_request_span::<Body> as fn(&Request<Body>) -> tracing::Span)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
