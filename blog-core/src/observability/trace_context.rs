//! Outgoing calls to the blog backend carry the W3C `traceparent` of the span
//! that issued them.

use opentelemetry::trace::{SpanContext, TraceContextExt};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::fmt::Display;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn traceparent(span_context: &SpanContext) -> String {
    format!(
        "00-{}-{}-{:02x}",
        span_context.trace_id(),
        span_context.span_id(),
        span_context.trace_flags().to_u8()
    )
}

/// Headers describing the current span, empty when no OpenTelemetry context is active.
pub fn trace_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let context = Span::current().context();
    let span = context.span();
    let span_context = span.span_context();
    if !span_context.is_valid() {
        return headers;
    }

    if let Ok(value) = HeaderValue::from_str(&traceparent(span_context)) {
        headers.insert(TRACEPARENT_HEADER, value);
    }
    let state = span_context.trace_state().header();
    if let Ok(value) = HeaderValue::from_str(&state) {
        if !state.is_empty() {
            headers.insert(TRACESTATE_HEADER, value);
        }
    }
    headers
}

/// Request builder whose `send` attaches [`trace_headers`].
pub struct TracedRequest(RequestBuilder);

impl TracedRequest {
    pub fn header(self, key: &str, value: &str) -> Self {
        Self(self.0.header(key, value))
    }

    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        Self(self.0.json(body))
    }

    pub fn query<T: Serialize + ?Sized>(self, query: &T) -> Self {
        Self(self.0.query(query))
    }

    pub fn bearer_auth<T: Display>(self, token: T) -> Self {
        Self(self.0.bearer_auth(token))
    }

    pub async fn send(self) -> Result<Response, reqwest::Error> {
        self.0.headers(trace_headers()).send().await
    }
}

pub trait TracedClientExt {
    fn traced_get(&self, url: &str) -> TracedRequest;
    fn traced_post(&self, url: &str) -> TracedRequest;
    fn traced_put(&self, url: &str) -> TracedRequest;
    fn traced_delete(&self, url: &str) -> TracedRequest;
}

impl TracedClientExt for Client {
    fn traced_get(&self, url: &str) -> TracedRequest {
        TracedRequest(self.get(url))
    }

    fn traced_post(&self, url: &str) -> TracedRequest {
        TracedRequest(self.post(url))
    }

    fn traced_put(&self, url: &str) -> TracedRequest {
        TracedRequest(self.put(url))
    }

    fn traced_delete(&self, url: &str) -> TracedRequest {
        TracedRequest(self.delete(url))
    }
}
