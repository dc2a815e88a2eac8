//! Static file responses.
//!
//! Turns a resolved file into a response, honoring conditional and
//! range headers and the HEAD method.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, RangeOutcome};

/// Serve the file at `path`, which resolution has already vetted.
pub async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
) -> io::Result<Response<Full<Bytes>>> {
    let content = fs::read(path).await?;
    // Missing modification times are fine; the ETag still validates.
    let modified = fs::metadata(path).await.and_then(|meta| meta.modified()).ok();
    let content_type = mime::content_type_for(path.extension().and_then(|ext| ext.to_str()));
    Ok(build_file_response(ctx, &content, content_type, modified))
}

/// Build the response for one file: 304 when the client's validators
/// still hold, 206/416 for range requests, 200 otherwise.
fn build_file_response(
    ctx: &RequestContext<'_>,
    content: &[u8],
    content_type: &'static str,
    modified: Option<SystemTime>,
) -> Response<Full<Bytes>> {
    let etag = cache::compute_etag(content);
    let last_modified = modified.map(cache::format_http_date);
    let total = content.len();

    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return http::not_modified(&etag, last_modified.as_deref());
    }
    // If-None-Match wins over If-Modified-Since; the date is consulted
    // only when the client sent no entity tag at all.
    if ctx.if_none_match.is_none() {
        if let Some(mtime) = modified {
            if cache::not_modified_since(ctx.if_modified_since.as_deref(), mtime) {
                return http::not_modified(&etag, last_modified.as_deref());
            }
        }
    }

    match http::interpret_range(ctx.range.as_deref(), total) {
        RangeOutcome::Partial(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::copy_from_slice(&content[range.start..=range.end])
            };
            http::partial_content(body, content_type, &etag, last_modified.as_deref(), range, total)
        }
        RangeOutcome::Unsatisfiable => http::range_not_satisfiable(total),
        RangeOutcome::Full => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::copy_from_slice(content)
            };
            http::ok_file(body, content_type, &etag, last_modified.as_deref(), total)
        }
    }
}
