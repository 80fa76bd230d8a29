//! Route table construction and resolution.
//!
//! # Responsibilities
//! - Compile `RouteConfig` trees into an immutable `RouteTable`
//! - Reject tables that break naming or wildcard rules
//! - Resolve a requested path to a route name, parameters and view chain
//! - Build URLs for named routes
//!
//! # Design Decisions
//! - Immutable after construction (shared across threads without locks)
//! - Depth-first, first match wins, declaration order is priority
//! - A parent only matches if it or one of its children consumes the whole path
//! - Resolution never fails: no match yields the `not-found` sentinel

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::{MatchingConfig, RouteConfig, RouterConfig};
use crate::routing::matcher::{PathPattern, PatternError, Segment, CATCH_ALL_PARAM};
use crate::routing::path::RequestPath;
use crate::views::ViewRef;

/// Route name reported when nothing in the table matches.
pub const NOT_FOUND: &str = "not-found";

/// Reasons a set of routes cannot form a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("route `{name}` has invalid pattern `{pattern}`: {source}")]
    Pattern {
        name: String,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("route with pattern `{0}` has an empty name")]
    EmptyName(String),

    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("route `{0}` has no view")]
    EmptyView(String),

    #[error("route `{name}` binds parameter `{param}` more than once")]
    DuplicateParam { name: String, param: String },

    #[error("catch-all route `{0}` cannot have children")]
    CatchAllWithChildren(String),

    #[error("wildcard route `{0}` must be the last of its siblings")]
    WildcardNotLast(String),
}

/// Reasons a URL cannot be built for a named route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HrefError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` needs parameter `{param}`")]
    MissingParam { route: String, param: String },
}

/// One compiled entry of the table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pattern: PathPattern,
    name: String,
    view: ViewRef,
    children: Vec<RouteEntry>,
}

impl RouteEntry {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &ViewRef {
        &self.view
    }

    pub fn children(&self) -> &[RouteEntry] {
        &self.children
    }

    /// The bare `*` entry.
    fn is_wildcard(&self) -> bool {
        self.pattern.segments() == [Segment::CatchAll]
    }
}

/// Flattened view of a named route, with its pattern joined to its ancestors'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub name: String,
    /// Full pattern, e.g. `/patients/:patientID`.
    pub pattern: String,
    pub view: ViewRef,
    #[serde(skip)]
    segments: Vec<Segment>,
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Name of the innermost matched route, or [`NOT_FOUND`].
    pub name: String,

    /// Bound path parameters.
    pub params: BTreeMap<String, String>,

    /// Query-string pairs of the requested path.
    pub query: BTreeMap<String, String>,

    /// Normalised path that was resolved.
    pub path: String,

    /// Views from the outermost to the innermost matched route.
    pub matched: Vec<ViewRef>,

    /// Whether the wildcard (or nothing at all) caught this path.
    pub fallback: bool,
}

impl RouteMatch {
    fn not_found(path: String, query: BTreeMap<String, String>) -> Self {
        Self {
            name: NOT_FOUND.to_string(),
            params: BTreeMap::new(),
            query,
            path,
            matched: Vec::new(),
            fallback: true,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The innermost view, the one the host mounts deepest.
    pub fn view(&self) -> Option<&ViewRef> {
        self.matched.last()
    }
}

/// Immutable, validated route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    summaries: Vec<RouteSummary>,
    by_name: HashMap<String, usize>,
    case_sensitive: bool,
}

impl RouteTable {
    /// Compile `routes`, failing on the first problem found.
    pub fn new(routes: &[RouteConfig], matching: &MatchingConfig) -> Result<Self, TableError> {
        let (table, problems) = Self::compile(routes, matching);
        if let Some(problem) = problems.into_iter().next() {
            return Err(problem);
        }

        tracing::info!(
            routes = table.summaries.len(),
            case_sensitive = table.case_sensitive,
            "Route table built"
        );
        Ok(table)
    }

    pub fn from_config(config: &RouterConfig) -> Result<Self, TableError> {
        Self::new(&config.routes, &config.matching)
    }

    /// Every problem in `routes`, in declaration order.
    pub fn check(routes: &[RouteConfig]) -> Vec<TableError> {
        Self::compile(routes, &MatchingConfig::default()).1
    }

    fn compile(routes: &[RouteConfig], matching: &MatchingConfig) -> (Self, Vec<TableError>) {
        let mut builder = Builder::default();
        let entries = builder.entries(routes, &[]);

        let by_name = builder
            .summaries
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        let table = Self {
            entries,
            summaries: builder.summaries,
            by_name,
            case_sensitive: matching.case_sensitive,
        };
        (table, builder.problems)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// All routes, depth-first in declaration order.
    pub fn routes(&self) -> &[RouteSummary] {
        &self.summaries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.summaries.iter().map(|s| s.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&RouteSummary> {
        self.by_name.get(name).map(|&i| &self.summaries[i])
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Resolve a requested path.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let request = RequestPath::parse(path);
        let normalized = request.to_path_string();

        let mut chain = Vec::new();
        let mut params = Vec::new();
        let found = match_entries(
            &self.entries,
            &request.segments,
            self.case_sensitive,
            &mut chain,
            &mut params,
        );

        let route_match = match chain.last() {
            Some(leaf) if found => RouteMatch {
                name: leaf.name.clone(),
                params: params.into_iter().collect(),
                query: request.query,
                path: normalized,
                matched: chain.iter().map(|e| e.view.clone()).collect(),
                fallback: leaf.is_wildcard(),
            },
            _ => RouteMatch::not_found(normalized, request.query),
        };

        tracing::debug!(
            requested = %path,
            path = %route_match.path,
            route = %route_match.name,
            fallback = route_match.fallback,
            "Path resolved"
        );
        route_match
    }

    /// Build the URL of a named route from parameter values.
    ///
    /// Values are percent-encoded; a catch-all value keeps its slashes.
    pub fn href(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String, HrefError> {
        let summary = self
            .get(name)
            .ok_or_else(|| HrefError::UnknownRoute(name.to_string()))?;

        let mut parts = Vec::with_capacity(summary.segments.len());
        for segment in &summary.segments {
            match segment {
                Segment::Static(text) => parts.push(text.clone()),
                Segment::Param(param) => {
                    let value = params
                        .get(param)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| HrefError::MissingParam {
                            route: name.to_string(),
                            param: param.clone(),
                        })?;
                    parts.push(urlencoding::encode(value).into_owned());
                }
                Segment::CatchAll => {
                    let rest = params.get(CATCH_ALL_PARAM).map(String::as_str).unwrap_or("");
                    parts.extend(
                        rest.split('/')
                            .filter(|p| !p.is_empty())
                            .map(|p| urlencoding::encode(p).into_owned()),
                    );
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }
}

fn match_entries<'t>(
    entries: &'t [RouteEntry],
    remaining: &[String],
    case_sensitive: bool,
    chain: &mut Vec<&'t RouteEntry>,
    params: &mut Vec<(String, String)>,
) -> bool {
    entries
        .iter()
        .any(|entry| match_entry(entry, remaining, case_sensitive, chain, params))
}

fn match_entry<'t>(
    entry: &'t RouteEntry,
    remaining: &[String],
    case_sensitive: bool,
    chain: &mut Vec<&'t RouteEntry>,
    params: &mut Vec<(String, String)>,
) -> bool {
    let mark = params.len();
    let Some(rest) = entry.pattern.match_prefix(remaining, case_sensitive, params) else {
        return false;
    };
    chain.push(entry);

    let descended = if rest.is_empty() {
        // Only zero-segment children may stand in for an exhausted parent.
        entry
            .children
            .iter()
            .filter(|child| child.pattern.segments().is_empty())
            .any(|child| match_entry(child, rest, case_sensitive, chain, params))
    } else {
        match_entries(&entry.children, rest, case_sensitive, chain, params)
    };

    if descended || rest.is_empty() {
        return true;
    }

    chain.pop();
    params.truncate(mark);
    false
}

#[derive(Default)]
struct Builder {
    problems: Vec<TableError>,
    seen: HashSet<String>,
    summaries: Vec<RouteSummary>,
}

impl Builder {
    fn entries(&mut self, routes: &[RouteConfig], prefix: &[Segment]) -> Vec<RouteEntry> {
        let last = routes.len().saturating_sub(1);
        routes
            .iter()
            .enumerate()
            .filter_map(|(i, route)| self.entry(route, prefix, i == last))
            .collect()
    }

    fn entry(&mut self, route: &RouteConfig, prefix: &[Segment], is_last: bool) -> Option<RouteEntry> {
        let name = route.name.trim().to_string();
        if name.is_empty() {
            self.problems.push(TableError::EmptyName(route.path.clone()));
        } else if !self.seen.insert(name.clone()) {
            self.problems.push(TableError::DuplicateName(name.clone()));
        }
        if route.view.is_empty() {
            self.problems.push(TableError::EmptyView(name.clone()));
        }

        let pattern = match PathPattern::parse(&route.path) {
            Ok(pattern) => pattern,
            Err(source) => {
                self.problems.push(TableError::Pattern {
                    name,
                    pattern: route.path.clone(),
                    source,
                });
                return None;
            }
        };

        if pattern.is_catch_all() && !route.children.is_empty() {
            self.problems.push(TableError::CatchAllWithChildren(name.clone()));
        }
        if pattern.segments() == [Segment::CatchAll] && !is_last {
            self.problems.push(TableError::WildcardNotLast(name.clone()));
        }

        let mut bound: HashSet<&str> = prefix.iter().filter_map(param_name).collect();
        for param in pattern.param_names() {
            if !bound.insert(param) {
                self.problems.push(TableError::DuplicateParam {
                    name: name.clone(),
                    param: param.to_string(),
                });
            }
        }

        let mut full = prefix.to_vec();
        full.extend(pattern.segments().iter().cloned());

        self.summaries.push(RouteSummary {
            name: name.clone(),
            pattern: render(&full),
            view: route.view.clone(),
            segments: full.clone(),
        });

        let children = self.entries(&route.children, &full);

        Some(RouteEntry {
            pattern,
            name,
            view: route.view.clone(),
            children,
        })
    }
}

fn param_name(segment: &Segment) -> Option<&str> {
    match segment {
        Segment::Param(name) => Some(name),
        Segment::CatchAll => Some(CATCH_ALL_PARAM),
        Segment::Static(_) => None,
    }
}

fn render(segments: &[Segment]) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|s| match s {
            Segment::Static(text) => text.clone(),
            Segment::Param(name) => format!(":{}", name),
            Segment::CatchAll => "*".to_string(),
        })
        .collect();
    format!("/{}", parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str, name: &str, view: &str) -> RouteConfig {
        RouteConfig::new(path, name, view)
    }

    fn table(routes: Vec<RouteConfig>) -> RouteTable {
        RouteTable::new(&routes, &MatchingConfig::default()).unwrap()
    }

    #[test]
    fn test_nested_resolution() {
        let table = table(vec![
            route("/", "home", "views/Home").with_children(vec![
                route("users", "users", "views/Users"),
                route("users/:id", "user", "views/User"),
            ]),
            route("*", "missing", "views/Missing"),
        ]);

        let m = table.resolve("/users/7");
        assert_eq!(m.name, "user");
        assert_eq!(m.param("id"), Some("7"));
        assert_eq!(m.matched, vec![ViewRef::new("views/Home"), ViewRef::new("views/User")]);
        assert!(!m.fallback);

        let m = table.resolve("/");
        assert_eq!(m.name, "home");
        assert!(m.params.is_empty());
        assert_eq!(m.matched, vec![ViewRef::new("views/Home")]);
    }

    #[test]
    fn test_backtracking_discards_params() {
        let table = table(vec![
            route(":section", "section", "views/Section").with_children(vec![route(
                "edit",
                "section-edit",
                "views/Edit",
            )]),
            route(":a/:b", "pair", "views/Pair"),
        ]);

        let m = table.resolve("/one/two");
        assert_eq!(m.name, "pair");
        assert_eq!(m.params.len(), 2);
        assert_eq!(m.param("a"), Some("one"));
        assert_eq!(m.param("section"), None);
        assert_eq!(m.matched, vec![ViewRef::new("views/Pair")]);
    }

    #[test]
    fn test_zero_segment_child_is_default() {
        let table = table(vec![route("reports", "reports", "views/Reports").with_children(vec![
            route("", "reports-index", "views/ReportsIndex"),
            route(":id", "report", "views/Report"),
        ])]);

        assert_eq!(table.resolve("/reports").name, "reports-index");
        assert_eq!(table.resolve("/reports/3").name, "report");
    }

    #[test]
    fn test_no_wildcard_yields_sentinel() {
        let table = table(vec![route("about", "about", "views/About")]);

        let m = table.resolve("/elsewhere?x=1");
        assert_eq!(m.name, NOT_FOUND);
        assert!(m.fallback);
        assert!(m.matched.is_empty());
        assert_eq!(m.path, "/elsewhere");
        assert_eq!(m.query.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_padded_patterns_match() {
        let table = table(vec![
            route("labs ", "labs", "views/Labs"),
            route(" labs/:labID", "single-lab", "views/Labs"),
        ]);

        assert_eq!(table.get("labs").map(|s| s.pattern.as_str()), Some("/labs"));
        assert_eq!(table.resolve("/labs").name, "labs");
        assert_eq!(table.resolve("/labs/l1").param("labID"), Some("l1"));
    }

    #[test]
    fn test_case_sensitivity() {
        let routes = vec![route("About", "about", "views/About")];

        let relaxed = RouteTable::new(&routes, &MatchingConfig::default()).unwrap();
        assert_eq!(relaxed.resolve("/about").name, "about");

        let strict = RouteTable::new(&routes, &MatchingConfig { case_sensitive: true }).unwrap();
        assert_eq!(strict.resolve("/about").name, NOT_FOUND);
        assert_eq!(strict.resolve("/About").name, "about");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let routes = vec![
            route("a", "same", "views/A"),
            route("/", "root", "views/Root").with_children(vec![route("b", "same", "views/B")]),
        ];
        let err = RouteTable::new(&routes, &MatchingConfig::default()).unwrap_err();
        assert_eq!(err, TableError::DuplicateName("same".into()));
    }

    #[test]
    fn test_check_reports_every_problem() {
        let routes = vec![
            route("*", "wild", "views/Wild"),
            route("x/:", "broken", "views/Broken"),
            route(":id", "", "").with_children(vec![route(":id", "inner", "views/Inner")]),
        ];
        let problems = RouteTable::check(&routes);

        assert!(problems.contains(&TableError::WildcardNotLast("wild".into())));
        assert!(problems.iter().any(|p| matches!(p, TableError::Pattern { name, .. } if name == "broken")));
        assert!(problems.contains(&TableError::EmptyName(":id".into())));
        assert!(problems.contains(&TableError::EmptyView(String::new())));
        assert!(problems.contains(&TableError::DuplicateParam {
            name: "inner".into(),
            param: "id".into()
        }));
    }

    #[test]
    fn test_catch_all_children_rejected() {
        let routes = vec![route("docs/*", "docs", "views/Docs")
            .with_children(vec![route("x", "x", "views/X")])];
        assert_eq!(
            RouteTable::check(&routes),
            vec![TableError::CatchAllWithChildren("docs".into())]
        );
    }

    #[test]
    fn test_href() {
        let table = table(vec![
            route("/", "home", "views/Home")
                .with_children(vec![route("users/:id", "user", "views/User")]),
            route("files/*", "files", "views/Files"),
        ]);

        let mut params = BTreeMap::new();
        params.insert("id".to_string(), "a b".to_string());
        assert_eq!(table.href("user", &params).unwrap(), "/users/a%20b");
        assert_eq!(table.href("home", &BTreeMap::new()).unwrap(), "/");

        let mut rest = BTreeMap::new();
        rest.insert(CATCH_ALL_PARAM.to_string(), "2024/report.pdf".to_string());
        assert_eq!(table.href("files", &rest).unwrap(), "/files/2024/report.pdf");

        assert_eq!(
            table.href("user", &BTreeMap::new()),
            Err(HrefError::MissingParam {
                route: "user".into(),
                param: "id".into()
            })
        );
        assert_eq!(
            table.href("nobody", &BTreeMap::new()),
            Err(HrefError::UnknownRoute("nobody".into()))
        );
    }

    #[test]
    fn test_summaries() {
        let table = table(vec![
            route("/", "home", "views/Home")
                .with_children(vec![route("users/:id", "user", "views/User")]),
            route("*", "missing", "views/Missing"),
        ]);
        let patterns: Vec<&str> = table.routes().iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["/", "/users/:id", "/*"]);
        assert_eq!(table.get("user").map(|r| r.view.as_str()), Some("views/User"));
        assert_eq!(table.len(), 3);
    }
}
