//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Detect `<type:name>` markers in a route pattern
//! - Compile dynamic patterns into an anchored regex
//! - Extract and convert captures on match
//! - Rebuild a concrete path from parameter values (reverse lookup)
//!
//! # Design Decisions
//! - Literal text between markers is regex-escaped
//! - Captures are positional; parameter names never become regex group names
//! - A repeated parameter name is rejected at compile time
//! - Conversion failures are a non-match, never an error

use std::sync::OnceLock;

use regex::Regex;

use crate::routing::error::RoutingError;
use crate::routing::params::{ParamType, Params};

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"<(\w+):(\w+)>").expect("marker regex is valid"))
}

/// Whether a pattern contains at least one parameter marker.
pub fn is_dynamic(pattern: &str) -> bool {
    marker_regex().is_match(pattern)
}

/// One piece of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param { name: String, ty: ParamType },
}

/// A compiled dynamic pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    segments: Vec<Segment>,
}

impl PathMatcher {
    /// Compile a pattern such as `/users/<int:user_id>/posts/<int:post_id>`.
    pub fn compile(pattern: &str) -> Result<Self, RoutingError> {
        let segments = parse_segments(pattern)?;

        let mut source = String::from("^");
        for segment in &segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Param { ty, .. } => {
                    source.push('(');
                    source.push_str(ty.pattern());
                    source.push(')');
                }
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| RoutingError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { regex, segments })
    }

    /// Match a full path, returning converted parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();
        for (index, (name, ty)) in self.params().enumerate() {
            let raw = captures.get(index + 1)?.as_str();
            params.insert(name, ty.convert(raw)?);
        }
        Some(params)
    }

    /// Declared parameters, in pattern order.
    pub fn params(&self) -> impl Iterator<Item = (&str, ParamType)> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param { name, ty } => Some((name.as_str(), *ty)),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute parameter values into the pattern.
    ///
    /// Values are written with their `Display` form. They are not checked
    /// against the declared type and are not URL-encoded.
    pub fn build(&self, endpoint: &str, params: &Params) -> Result<String, RoutingError> {
        let mut url = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Param { name, .. } => {
                    let value = params.get(name).ok_or_else(|| RoutingError::MissingParameter {
                        endpoint: endpoint.to_string(),
                        name: name.clone(),
                    })?;
                    url.push_str(&value.to_string());
                }
            }
        }
        Ok(url)
    }
}

fn parse_segments(pattern: &str) -> Result<Vec<Segment>, RoutingError> {
    let mut segments = Vec::new();
    let mut seen: Vec<&str> = Vec::new();
    let mut last = 0;

    for caps in marker_regex().captures_iter(pattern) {
        let (Some(whole), Some(ty), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        if seen.contains(&name.as_str()) {
            return Err(RoutingError::DuplicateParameter {
                pattern: pattern.to_string(),
                name: name.as_str().to_string(),
            });
        }
        seen.push(name.as_str());

        if whole.start() > last {
            segments.push(Segment::Literal(pattern[last..whole.start()].to_string()));
        }
        segments.push(Segment::Param {
            name: name.as_str().to_string(),
            ty: ParamType::from_name(ty.as_str()),
        });
        last = whole.end();
    }

    if last < pattern.len() {
        segments.push(Segment::Literal(pattern[last..].to_string()));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::params::ParamValue;

    #[test]
    fn test_detects_markers() {
        assert!(is_dynamic("/users/<int:id>"));
        assert!(!is_dynamic("/users"));
        assert!(!is_dynamic("/users/<id>"));
    }

    #[test]
    fn test_int_param_is_typed() {
        let matcher = PathMatcher::compile("/users/<int:user_id>").unwrap();
        let params = matcher.matches("/users/123").unwrap();
        assert_eq!(params.get("user_id"), Some(&ParamValue::Int(123)));
        assert!(matcher.matches("/users/abc").is_none());
    }

    #[test]
    fn test_match_is_anchored() {
        let matcher = PathMatcher::compile("/users/<int:id>").unwrap();
        assert!(matcher.matches("/users/1/extra").is_none());
        assert!(matcher.matches("/api/users/1").is_none());
    }

    #[test]
    fn test_str_does_not_cross_slash() {
        let matcher = PathMatcher::compile("/profile/<str:username>").unwrap();
        assert_eq!(
            matcher.matches("/profile/john_doe").unwrap().get_str("username"),
            Some("john_doe")
        );
        assert!(matcher.matches("/profile/john/doe").is_none());
    }

    #[test]
    fn test_path_crosses_slash() {
        let matcher = PathMatcher::compile("/files/<path:filepath>").unwrap();
        let params = matcher.matches("/files/docs/readme.txt").unwrap();
        assert_eq!(params.get_str("filepath"), Some("docs/readme.txt"));
    }

    #[test]
    fn test_literals_are_escaped() {
        let matcher = PathMatcher::compile("/v1.0/<int:id>").unwrap();
        assert!(matcher.matches("/v1.0/5").is_some());
        assert!(matcher.matches("/v1x0/5").is_none());
    }

    #[test]
    fn test_unknown_type_behaves_as_str() {
        let matcher = PathMatcher::compile("/items/<slug:item>").unwrap();
        assert_eq!(
            matcher.matches("/items/blue-shoe").unwrap().get_str("item"),
            Some("blue-shoe")
        );
    }

    #[test]
    fn test_int_accepts_ascii_digits_only() {
        let matcher = PathMatcher::compile("/users/<int:id>").unwrap();
        assert!(matcher.matches("/users/\u{0661}\u{0662}\u{0663}").is_none());
        assert!(matcher.matches("/users/\u{FF11}").is_none());
        assert_eq!(matcher.matches("/users/123").unwrap().get_int("id"), Some(123));
    }

    #[test]
    fn test_overflowing_int_is_no_match() {
        let matcher = PathMatcher::compile("/n/<int:n>").unwrap();
        assert!(matcher.matches("/n/99999999999999999999").is_none());
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let err = PathMatcher::compile("/a/<int:id>/b/<str:id>").unwrap_err();
        assert_eq!(
            err,
            RoutingError::DuplicateParameter {
                pattern: "/a/<int:id>/b/<str:id>".into(),
                name: "id".into(),
            }
        );
    }

    #[test]
    fn test_build() {
        let matcher = PathMatcher::compile("/users/<int:user_id>/posts/<str:slug>").unwrap();
        let url = matcher
            .build("post", &Params::new().with("user_id", 42).with("slug", "hi"))
            .unwrap();
        assert_eq!(url, "/users/42/posts/hi");

        let err = matcher.build("post", &Params::new().with("user_id", 42)).unwrap_err();
        assert_eq!(
            err,
            RoutingError::MissingParameter {
                endpoint: "post".into(),
                name: "slug".into(),
            }
        );
    }
}
