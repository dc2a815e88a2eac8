//! Request entry point.
//!
//! Decides between a real asset and the fallback document for every
//! request, then records the outcome in the access log. Handling never
//! fails: filesystem trouble becomes a 500 response, not an error
//! returned to hyper.

use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::{spa, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Per-request data the responders care about.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range: Option<String>,
}

/// Handle one request end to end.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let ctx = RequestContext {
        path: req.uri().path(),
        is_head: *req.method() == Method::HEAD,
        if_none_match: header_value(&req, "if-none-match"),
        if_modified_since: header_value(&req, "if-modified-since"),
        range: header_value(&req, "range"),
    };

    let response = respond(&ctx, &state).await;

    if state.access_log_enabled() {
        let entry = access_entry(&req, peer_addr, &response, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve the path and produce exactly one response.
async fn respond(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match spa::resolve(state, ctx.path).await {
        Ok(spa::Resolution::Asset(path)) => match static_files::serve_file(ctx, &path).await {
            Ok(response) => response,
            // The file vanished between resolution and read.
            Err(e) if e.kind() == io::ErrorKind::NotFound => serve_fallback(ctx, state).await,
            Err(e) => server_error(ctx.path, "failed to read asset", &e),
        },
        Ok(spa::Resolution::Fallback) => serve_fallback(ctx, state).await,
        Err(e) => server_error(ctx.path, "failed to resolve request path", &e),
    }
}

/// Serve the fallback document. Losing it is the one per-request
/// failure nothing can paper over.
async fn serve_fallback(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match static_files::serve_file(ctx, state.fallback_file()).await {
        Ok(response) => response,
        Err(e) => server_error(ctx.path, "fallback document unavailable", &e),
    }
}

/// Log the failure with full detail, answer with a generic body.
fn server_error(path: &str, reason: &str, error: &io::Error) -> Response<Full<Bytes>> {
    logger::log_error(&format!("{reason} for '{path}': {error}"));
    http::internal_error(reason)
}

fn access_entry<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|bytes| usize::try_from(bytes).ok())
        .unwrap_or(0);

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = body_bytes;
    entry.referer = header_value(req, "referer");
    entry.user_agent = header_value(req, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        v if v == hyper::Version::HTTP_09 => "0.9",
        v if v == hyper::Version::HTTP_10 => "1.0",
        v if v == hyper::Version::HTTP_2 => "2",
        v if v == hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
