//! HTTP Range header parsing
//!
//! Single-range `bytes=` parsing per RFC 7233, used for segment and media
//! partial fetches.

/// Parsed byte range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRange {
    /// Start byte position
    pub start: usize,
    /// End byte position, None means until end of file
    pub end: Option<usize>,
}

impl ByteRange {
    /// Actual end position for a file of `file_size` bytes.
    #[inline]
    pub fn end_position(&self, file_size: usize) -> usize {
        self.end.unwrap_or_else(|| file_size.saturating_sub(1))
    }

    /// Number of bytes the range covers (test validation only).
    #[cfg(test)]
    pub fn content_length(&self, file_size: usize) -> usize {
        let end = self.end_position(file_size);
        end.saturating_sub(self.start) + 1
    }
}

/// Range header parse result
#[derive(Debug)]
pub enum RangeParseResult {
    /// Valid range request
    Valid(ByteRange),
    /// Range cannot be satisfied (start beyond file end) - answer 416
    NotSatisfiable,
    /// No Range header, or malformed - serve the full body
    None,
}

/// Parse an HTTP Range header against a known file size.
///
/// Supported forms:
/// - `bytes=start-end`
/// - `bytes=start-` (open ended)
/// - `bytes=-suffix` (last `suffix` bytes)
///
/// Multi-range requests and non-`bytes` units are ignored rather than
/// rejected, falling back to a full response.
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeParseResult {
    let Some(header) = range_header else {
        return RangeParseResult::None;
    };

    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeParseResult::None;
    };

    if spec.contains(',') {
        return RangeParseResult::None;
    }

    let parts: Vec<&str> = spec.split('-').collect();
    if parts.len() != 2 {
        return RangeParseResult::None;
    }

    let (start_str, end_str) = (parts[0].trim(), parts[1].trim());

    if start_str.is_empty() {
        return parse_suffix_range(end_str, file_size);
    }

    parse_standard_range(start_str, end_str, file_size)
}

/// Suffix form, e.g. `-500`
fn parse_suffix_range(suffix_str: &str, file_size: usize) -> RangeParseResult {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeParseResult::None;
    };

    if suffix == 0 {
        return RangeParseResult::NotSatisfiable;
    }

    // A suffix longer than the file just covers the whole file.
    let start = file_size.saturating_sub(suffix);
    RangeParseResult::Valid(ByteRange {
        start,
        end: Some(file_size - 1),
    })
}

/// Standard form, e.g. `0-99` or `100-`
fn parse_standard_range(start_str: &str, end_str: &str, file_size: usize) -> RangeParseResult {
    let Ok(start) = start_str.parse::<usize>() else {
        return RangeParseResult::None;
    };

    if start >= file_size {
        return RangeParseResult::NotSatisfiable;
    }

    let end = if end_str.is_empty() {
        None
    } else {
        let Ok(e) = end_str.parse::<usize>() else {
            return RangeParseResult::None;
        };
        // Clamp to the last byte
        Some(e.min(file_size - 1))
    };

    if let Some(e) = end {
        if start > e {
            return RangeParseResult::NotSatisfiable;
        }
    }

    RangeParseResult::Valid(ByteRange { start, end })
}
