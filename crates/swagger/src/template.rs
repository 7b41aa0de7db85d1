use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal path segment that precedes a resource-provider namespace in the
/// ARM path convention (`.../providers/Microsoft.Storage/...`).
pub const PROVIDERS_MARKER: &str = "providers";

/// HTTP verbs a swagger path item may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl Method {
    /// Parse a verb case-insensitively. Returns `None` for anything that is
    /// not an HTTP method key (`parameters`, `x-*` extensions, garbage input).
    pub fn parse(value: &str) -> Option<Self> {
        let method = match value.to_ascii_lowercase().as_str() {
            "get" => Method::Get,
            "put" => Method::Put,
            "post" => Method::Post,
            "delete" => Method::Delete,
            "options" => Method::Options,
            "head" => Method::Head,
            "patch" => Method::Patch,
            _ => return None,
        };
        Some(method)
    }

    /// Lowercase name, the form used as an index key.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
        }
    }

    /// All verbs, in a fixed order. Useful for diagnostics over index buckets.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Patch,
    ];
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of a declared path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Segment {
    /// Fixed text; matches a concrete segment case-insensitively.
    Literal(String),
    /// Named placeholder (`{accountName}`); matches any non-empty segment.
    Parameter(String),
}

impl Segment {
    fn matches(&self, concrete: &str) -> bool {
        match self {
            Segment::Literal(text) => text.eq_ignore_ascii_case(concrete),
            Segment::Parameter(_) => !concrete.is_empty(),
        }
    }
}

/// A declared path pattern, decomposed into ordered segments.
///
/// Templates are parsed once at document load and never change; matching is a
/// pure comparison against a concrete request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Decompose a declared path. Empty segments (leading slash, doubled
    /// slashes) are dropped; `{name}` becomes a parameter segment.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Segment::Parameter(name.to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The declared path exactly as it appeared in the document.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of placeholder segments. Lower means more specific; the
    /// matcher's specificity post-filter keys on this.
    pub fn parameter_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Parameter(_)))
            .count()
    }

    /// Structural match against a concrete path: segment counts must be
    /// equal, literals compare case-insensitively, parameters accept any
    /// non-empty segment.
    pub fn matches(&self, concrete: &[&str]) -> bool {
        self.segments.len() == concrete.len()
            && self
                .segments
                .iter()
                .zip(concrete)
                .all(|(segment, value)| segment.matches(value))
    }

    /// The resource-provider namespace this template addresses: the literal
    /// segment following the `providers` marker, lowercased. `None` when the
    /// marker is absent, is the final segment, or is followed by a
    /// placeholder (generic provider-agnostic templates).
    pub fn resource_provider(&self) -> Option<String> {
        let marker = self.segments.iter().position(|s| {
            matches!(s, Segment::Literal(text) if text.eq_ignore_ascii_case(PROVIDERS_MARKER))
        })?;
        match self.segments.get(marker + 1) {
            Some(Segment::Literal(namespace)) => Some(namespace.to_ascii_lowercase()),
            _ => None,
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!(Method::parse("PoSt"), Some(Method::Post));
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("delete"), Some(Method::Delete));
        assert_eq!(Method::parse("parameters"), None);
        assert_eq!(Method::parse("x-ms-paths"), None);
    }

    #[test]
    fn template_splits_literals_and_parameters() {
        let template =
            PathTemplate::parse("/subscriptions/{subscriptionId}/providers/Microsoft.Storage");
        assert_eq!(template.segments().len(), 4);
        assert_eq!(
            template.segments()[1],
            Segment::Parameter("subscriptionId".to_string())
        );
        assert_eq!(template.parameter_count(), 1);
        assert_eq!(
            template.raw(),
            "/subscriptions/{subscriptionId}/providers/Microsoft.Storage"
        );
    }

    #[test]
    fn matching_requires_equal_segment_counts() {
        let template = PathTemplate::parse("/a/{b}/c");
        assert!(template.matches(&["a", "anything", "c"]));
        assert!(!template.matches(&["a", "anything"]));
        assert!(!template.matches(&["a", "anything", "c", "d"]));
    }

    #[test]
    fn literal_segments_match_case_insensitively() {
        let template = PathTemplate::parse(
            "/subscriptions/{subscriptionId}/providers/Microsoft.Storage/storageAccounts",
        );
        assert!(template.matches(&[
            "Subscriptions",
            "abc-123",
            "PROVIDERS",
            "microsoft.storage",
            "storageaccounts"
        ]));
        assert!(!template.matches(&[
            "subscriptions",
            "abc-123",
            "providers",
            "Microsoft.Compute",
            "storageAccounts"
        ]));
    }

    #[test]
    fn parameters_reject_empty_segments() {
        let template = PathTemplate::parse("/a/{b}");
        assert!(!template.matches(&["a", ""]));
    }

    #[test]
    fn resource_provider_reads_segment_after_marker() {
        let template = PathTemplate::parse(
            "/subscriptions/{subscriptionId}/resourceGroups/{rg}/providers/Microsoft.Media/mediaservices/{name}",
        );
        assert_eq!(
            template.resource_provider(),
            Some("microsoft.media".to_string())
        );
    }

    #[test]
    fn resource_provider_is_none_without_marker() {
        let template = PathTemplate::parse("/subscriptions/{subscriptionId}/resourcegroups/{rg}");
        assert_eq!(template.resource_provider(), None);
    }

    #[test]
    fn resource_provider_is_none_for_placeholder_namespace() {
        let template = PathTemplate::parse(
            "/subscriptions/{subscriptionId}/providers/{resourceProviderNamespace}/register",
        );
        assert_eq!(template.resource_provider(), None);
    }

    #[test]
    fn resource_provider_is_none_for_trailing_marker() {
        let template = PathTemplate::parse("/subscriptions/{subscriptionId}/providers");
        assert_eq!(template.resource_provider(), None);
    }
}
