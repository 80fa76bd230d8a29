//! Normalisation of requested paths.
//!
//! # Responsibilities
//! - Accept whatever the navigation mechanism hands over
//! - Produce decoded segments plus query pairs
//!
//! # Design Decisions
//! - Never fails: odd input degrades to a best-effort split
//! - Hash-history input (`#/patients`) is treated like a plain path
//! - Backslashes, repeated and trailing slashes are all tolerated
//! - `.` and `..` are resolved by the URL parser, never escaping the root

use std::borrow::Cow;
use std::collections::BTreeMap;

use url::Url;

const BASE: &str = "http://localhost/";

/// A requested location split into matchable parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestPath {
    /// Percent-decoded, non-empty path segments.
    pub segments: Vec<String>,

    /// Query-string pairs (last value wins on duplicate keys).
    pub query: BTreeMap<String, String>,
}

impl RequestPath {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let relative = trimmed.trim_start_matches(['/', '\\']);

        // "./" keeps a leading "name:" segment from being read as a scheme.
        match Url::parse(BASE).and_then(|base| base.join(&format!("./{}", relative))) {
            Ok(url) => Self::from_url(&url),
            Err(e) => {
                tracing::debug!(path = %input, error = %e, "Path not parseable as URL, splitting verbatim");
                Self::split_verbatim(relative)
            }
        }
    }

    /// The normalised path, always starting with `/`, segments re-encoded
    /// so that parsing it again yields the same segments.
    pub fn to_path_string(&self) -> String {
        let encoded: Vec<Cow<'_, str>> = self
            .segments
            .iter()
            .map(|s| urlencoding::encode(s))
            .collect();
        format!("/{}", encoded.join("/"))
    }

    fn from_url(url: &Url) -> Self {
        let segments: Vec<String> = url
            .path_segments()
            .map(|parts| parts.filter(|s| !s.is_empty()).map(decode).collect())
            .unwrap_or_default();

        let query: BTreeMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self { segments, query }
    }

    fn split_verbatim(relative: &str) -> Self {
        let without_fragment = relative.split('#').next().unwrap_or_default();
        let path = without_fragment.split('?').next().unwrap_or_default();
        let segments: Vec<String> = path
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(decode)
            .collect();

        Self {
            segments,
            query: BTreeMap::new(),
        }
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .unwrap_or(Cow::Borrowed(segment))
        .into_owned()
}
