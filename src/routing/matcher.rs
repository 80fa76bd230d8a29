//! Path pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse route patterns (`patients/:patientID`, `/`, `*`)
//! - Match a pattern against the front of a segment list
//! - Bind named parameters while matching
//!
//! # Design Decisions
//! - Static segments compare case-insensitively unless configured otherwise
//! - Parameter values keep the case they were requested with
//! - `:name` matches exactly one non-empty segment
//! - A trailing `*` swallows the rest (possibly nothing) into `pathMatch`
//! - No regex: matching is a single pass over the segments

use thiserror::Error;

/// Parameter name bound by a trailing `*` segment.
pub const CATCH_ALL_PARAM: &str = "pathMatch";

/// Problems found while parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("parameter segment has no name")]
    EmptyParam,

    #[error("parameter name `{0}` may only contain letters, digits and `_`")]
    InvalidParam(String),

    #[error("`*` is only allowed as the last segment")]
    CatchAllNotLast,
}

/// One piece of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text that must appear as-is.
    Static(String),
    /// `:name`, binds one segment.
    Param(String),
    /// `*`, binds the remainder.
    CatchAll,
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. Leading, trailing and repeated slashes are ignored,
    /// so `/` and the empty string both denote the zero-segment pattern.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let raw = raw.trim();
        let parts: Vec<&str> = raw.split('/').filter(|p| !p.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if i + 1 != parts.len() {
                    return Err(PatternError::CatchAllNotLast);
                }
                Segment::CatchAll
            } else if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParam);
                }
                if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    return Err(PatternError::InvalidParam(name.to_string()));
                }
                Segment::Param(name.to_string())
            } else {
                Segment::Static(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the pattern ends in `*`.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll))
    }

    /// Names this pattern binds, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::CatchAll => Some(CATCH_ALL_PARAM),
            Segment::Static(_) => None,
        })
    }

    /// Match this pattern against the front of `path`.
    ///
    /// On success the bound parameters are appended to `params` and the
    /// unconsumed remainder is returned. On failure `params` is left as it
    /// was.
    pub fn match_prefix<'p>(
        &self,
        path: &'p [String],
        case_sensitive: bool,
        params: &mut Vec<(String, String)>,
    ) -> Option<&'p [String]> {
        let mark = params.len();
        let mut consumed = 0;

        for segment in &self.segments {
            match segment {
                Segment::CatchAll => {
                    params.push((CATCH_ALL_PARAM.to_string(), path[consumed..].join("/")));
                    return Some(&path[path.len()..]);
                }
                Segment::Param(name) => match path.get(consumed) {
                    Some(value) if !value.is_empty() => {
                        params.push((name.clone(), value.clone()));
                    }
                    _ => {
                        params.truncate(mark);
                        return None;
                    }
                },
                Segment::Static(expected) => match path.get(consumed) {
                    Some(actual) if static_eq(expected, actual, case_sensitive) => {}
                    _ => {
                        params.truncate(mark);
                        return None;
                    }
                },
            }
            consumed += 1;
        }

        Some(&path[consumed..])
    }
}

fn static_eq(expected: &str, actual: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        expected == actual
    } else {
        expected == actual || expected.to_lowercase() == actual.to_lowercase()
    }
}
