#![forbid(unsafe_code)]

//! Modal title lookup from the application route table.
//!
//! The modal header names the page the user is on. The title is the `name`
//! of the route whose `path` is the longest prefix of the current location.
//! Nested routes are searched depth-first; on equal lengths the first route
//! found wins.

#[cfg(feature = "serde")]
use serde::Deserialize;

/// One node of the route table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteNode {
    pub path: Option<String>,
    pub name: Option<String>,
    pub routes: Vec<RouteNode>,
}

impl RouteNode {
    /// A named leaf route.
    #[must_use]
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            name: Some(name.into()),
            routes: Vec::new(),
        }
    }

    /// Attach child routes.
    #[must_use]
    pub fn with_routes(mut self, routes: Vec<RouteNode>) -> Self {
        self.routes = routes;
        self
    }
}

/// Name of the longest route prefix of `pathname`, if any.
#[must_use]
pub fn best_match<'a>(routes: &'a [RouteNode], pathname: &str) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    let mut stack: Vec<&'a RouteNode> = routes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if let (Some(path), Some(name)) = (node.path.as_deref(), node.name.as_deref())
            && pathname.starts_with(path)
            && best.is_none_or(|(_, len)| path.len() > len)
        {
            best = Some((name, path.len()));
        }
        stack.extend(node.routes.iter().rev());
    }

    best.map(|(name, _)| name)
}

/// Modal title for `pathname`, or `fallback` when no route matches.
#[must_use]
pub fn resolve_title<'a>(routes: &'a [RouteNode], pathname: &str, fallback: &'a str) -> &'a str {
    best_match(routes, pathname).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<RouteNode> {
        vec![
            RouteNode::named("/welcome", "首页"),
            RouteNode {
                path: Some("/germplasm".into()),
                name: Some("种质创制".into()),
                routes: vec![
                    RouteNode::named("/germplasm/mutation", "诱变育种"),
                    RouteNode::named("/germplasm/backcross/sowing", "播种记录"),
                ],
            },
            RouteNode {
                path: Some("/hybrid".into()),
                name: None,
                routes: vec![RouteNode::named("/hybrid/plan", "杂交计划")],
            },
        ]
    }

    #[test]
    fn longest_prefix_wins() {
        let routes = table();
        assert_eq!(best_match(&routes, "/germplasm/mutation/saved"), Some("诱变育种"));
        assert_eq!(best_match(&routes, "/germplasm/backcross/sowing"), Some("播种记录"));
        assert_eq!(best_match(&routes, "/germplasm/other"), Some("种质创制"));
    }

    #[test]
    fn unnamed_nodes_are_skipped_but_searched() {
        let routes = table();
        assert_eq!(best_match(&routes, "/hybrid"), None);
        assert_eq!(best_match(&routes, "/hybrid/plan"), Some("杂交计划"));
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let routes = table();
        assert_eq!(resolve_title(&routes, "/login", "育小星"), "育小星");
        assert_eq!(resolve_title(&[], "/welcome", "育小星"), "育小星");
    }

    #[test]
    fn equal_length_keeps_first() {
        let routes = vec![RouteNode::named("/a", "first"), RouteNode::named("/a", "second")];
        assert_eq!(best_match(&routes, "/a/b"), Some("first"));
    }
}
