//! Response builders for the handful of statuses the server emits.
//!
//! Header values here are produced by this crate and are always valid,
//! but builder failures still degrade to an empty response with the
//! right status instead of panicking.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::http::range::ByteRange;
use crate::logger;

fn log_build_error(context: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {context} response: {error}"));
}

fn degraded(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

/// Build a `200 OK` response for a complete file.
///
/// `content_length` is passed separately because HEAD responses carry an
/// empty body while still advertising the real length.
pub fn ok_file(
    body: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    content_length: usize,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag);
    if let Some(value) = last_modified {
        builder = builder.header("Last-Modified", value);
    }
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("file", &e);
        degraded(StatusCode::OK)
    })
}

/// Build a `206 Partial Content` response for one byte range of a file.
pub fn partial_content(
    body: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    range: ByteRange,
    total_size: usize,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header("Content-Type", content_type)
        .header("Content-Length", range.len())
        .header("Content-Range", format!("bytes {}-{}/{total_size}", range.start, range.end))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag);
    if let Some(value) = last_modified {
        builder = builder.header("Last-Modified", value);
    }
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("partial content", &e);
        degraded(StatusCode::PARTIAL_CONTENT)
    })
}

/// Build a `304 Not Modified` response carrying the current validators.
pub fn not_modified(etag: &str, last_modified: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag);
    if let Some(value) = last_modified {
        builder = builder.header("Last-Modified", value);
    }
    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("not modified", &e);
        degraded(StatusCode::NOT_MODIFIED)
    })
}

/// Build a `416 Range Not Satisfiable` response.
///
/// The `Content-Range` header tells the client the actual size so it can
/// retry with a valid range.
pub fn range_not_satisfiable(total_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::RANGE_NOT_SATISFIABLE)
        .header("Content-Range", format!("bytes */{total_size}"))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("range not satisfiable", &e);
            degraded(StatusCode::RANGE_NOT_SATISFIABLE)
        })
}

/// Build a `500 Internal Server Error` response.
///
/// The body names only a broad failure category. Details stay in the
/// error log where they cannot leak filesystem layout to clients.
pub fn internal_error(reason: &str) -> Response<Full<Bytes>> {
    let body = format!("500 Internal Server Error: {reason}\n");
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("internal error", &e);
            degraded(StatusCode::INTERNAL_SERVER_ERROR)
        })
}
