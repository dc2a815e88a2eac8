//! Byte range request parsing.
//!
//! Only single ranges in the `bytes` unit are served. Multipart ranges
//! and unknown units are legal to ignore, in which case the full
//! representation is sent instead.

/// A satisfiable byte range with both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)] // a range is never empty by construction
impl ByteRange {
    /// Number of bytes the range covers.
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of interpreting a `Range` header against a body of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve the selected part with `206 Partial Content`.
    Partial(ByteRange),
    /// The range lies entirely outside the body, answer `416`.
    Unsatisfiable,
    /// No header, or one we are allowed to ignore: serve the whole body.
    Full,
}

/// Interpret an optional `Range` header value for a body of `size` bytes.
///
/// Accepted forms are `bytes=a-b`, `bytes=a-` and the suffix form
/// `bytes=-n`. Anything else, including multipart ranges and ranges where
/// the end precedes the start, is ignored per RFC 9110 rather than
/// rejected.
pub fn interpret_range(header: Option<&str>, size: usize) -> RangeOutcome {
    let Some(range_set) = header.and_then(|value| value.trim().strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };
    if range_set.contains(',') {
        return RangeOutcome::Full;
    }
    let Some((start_part, end_part)) = range_set.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_part, end_part) = (start_part.trim(), end_part.trim());

    if start_part.is_empty() {
        return interpret_suffix(end_part, size);
    }

    let Ok(start) = start_part.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_part.is_empty() {
        size - 1
    } else {
        match end_part.parse::<usize>() {
            // Ends past the body are clamped, not rejected.
            Ok(end) => end.min(size - 1),
            Err(_) => return RangeOutcome::Full,
        }
    };

    if end < start {
        return RangeOutcome::Full;
    }
    RangeOutcome::Partial(ByteRange { start, end })
}

/// Handle the `bytes=-n` form requesting the final `n` bytes.
fn interpret_suffix(length_part: &str, size: usize) -> RangeOutcome {
    let Ok(length) = length_part.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if length == 0 || size == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange {
        start: size.saturating_sub(length),
        end: size - 1,
    })
}
