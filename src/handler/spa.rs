//! Request path resolution against the asset root.
//!
//! Decides, for each request path, whether to serve a real file from
//! the asset root or the fallback document. Filesystem failures other
//! than "not found" surface as errors so callers can answer 500 while
//! a plain miss quietly becomes the fallback.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::config::AppState;
use crate::logger;

/// What a request path resolved to.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// An existing regular file under the asset root.
    Asset(PathBuf),
    /// Nothing servable at this path: send the fallback document.
    Fallback,
}

/// Resolve a URL path to a servable file.
///
/// The path is percent-decoded and reduced to its plain components
/// before touching the filesystem, directories are probed for an index
/// file, and the final candidate is canonicalized and checked to still
/// live under the asset root so symlinks cannot leak files outside it.
pub async fn resolve(state: &AppState, request_path: &str) -> io::Result<Resolution> {
    // Escapes arrive still encoded on the wire. A path that does not
    // decode cleanly cannot name a real file, so it is a plain miss.
    let Some(decoded) = percent_decode_path(request_path) else {
        return Ok(Resolution::Fallback);
    };
    let relative = sanitize_request_path(&decoded);

    // Without a resolvable root there is no containment to check
    // against; this is a deployment error, not a missing asset.
    let root = tokio::fs::canonicalize(state.asset_root()).await?;
    let candidate = root.join(relative);

    let meta = match tokio::fs::metadata(&candidate).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Resolution::Fallback),
        Err(e) => return Err(e),
    };

    let chosen = if meta.is_file() {
        Some(candidate)
    } else if meta.is_dir() {
        pick_index_file(&candidate, state.index_files()).await?
    } else {
        // Sockets, FIFOs and such have no servable content.
        None
    };

    let Some(chosen) = chosen else {
        return Ok(Resolution::Fallback);
    };

    // Symlinks inside the root may still point outside it.
    let resolved = match tokio::fs::canonicalize(&chosen).await {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Resolution::Fallback),
        Err(e) => return Err(e),
    };

    if resolved.starts_with(&root) {
        Ok(Resolution::Asset(resolved))
    } else {
        logger::log_warning(&format!(
            "Blocked request resolving outside the asset root: {request_path} -> {}",
            resolved.display()
        ));
        Ok(Resolution::Fallback)
    }
}

/// Reduce a URL path to a safe relative filesystem path.
///
/// Root markers, `.` and `..` are discarded rather than resolved, so
/// the result can never climb above the directory it is joined to.
pub fn sanitize_request_path(request_path: &str) -> PathBuf {
    Path::new(request_path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Decode `%XX` escapes in a request path.
///
/// Decoding happens once, before sanitization, so an encoded `..`
/// still gets discarded as a plain parent marker. Returns `None` for
/// a malformed escape, an encoded NUL, or a result that is not valid
/// UTF-8; none of those can name a real file. `+` stays literal since
/// that convention belongs to query strings.
fn percent_decode_path(request_path: &str) -> Option<String> {
    let bytes = request_path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_digit(*bytes.get(i + 1)?)?;
            let lo = hex_digit(*bytes.get(i + 2)?)?;
            let byte = (hi << 4) | lo;
            if byte == 0 {
                return None;
            }
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

const fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// First entry from `index_files` that exists as a file in `dir`.
async fn pick_index_file(dir: &Path, index_files: &[String]) -> io::Result<Option<PathBuf>> {
    for name in index_files {
        let candidate = dir.join(name);
        match tokio::fs::metadata(&candidate).await {
            Ok(meta) if meta.is_file() => return Ok(Some(candidate)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
