use std::sync::Arc;

use index::{OperationIndex, UNKNOWN_API_VERSION, UNKNOWN_RESOURCE_PROVIDER};
use swagger::{Method, Operation, PROVIDERS_MARKER};
use tracing::debug;

use crate::request::RequestParts;

/// Resolve an observed (url, method) pair to every declared operation whose
/// template structurally matches it.
///
/// Results are ordered primary bucket first, then the sentinel fallback
/// bucket, preserving index insertion order within each. An unknown HTTP
/// verb or a url nothing was declared for yields an empty vector; this
/// function never fails.
pub fn potential_operations(
    index: &OperationIndex,
    url: &str,
    method: &str,
) -> Vec<Arc<Operation>> {
    let Some(method) = Method::parse(method) else {
        debug!(method, "unrecognized http method, no candidate operations");
        return Vec::new();
    };
    let parts = RequestParts::parse(url);
    let segments: Vec<&str> = parts.segments.iter().map(String::as_str).collect();

    let provider = provider_in_path(&segments);
    let version = parts
        .api_version
        .as_deref()
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| UNKNOWN_API_VERSION.to_string());

    // Primary bucket first. Whenever the path does not resolve to a known
    // provider — no namespace in the path, or a namespace nothing was indexed
    // under — the sentinel pair is searched as well: provider-agnostic
    // operations live there regardless of their declared versions.
    let mut buckets: Vec<(&str, &str)> = Vec::with_capacity(2);
    match &provider {
        Some(candidate) => {
            buckets.push((candidate.as_str(), version.as_str()));
            if !index.contains_provider(candidate) {
                buckets.push((UNKNOWN_RESOURCE_PROVIDER, UNKNOWN_API_VERSION));
            }
        }
        None => buckets.push((UNKNOWN_RESOURCE_PROVIDER, UNKNOWN_API_VERSION)),
    }

    let mut matches = Vec::new();
    for (provider_key, version_key) in buckets {
        for operation in index.bucket(provider_key, version_key, method) {
            if operation.template.matches(&segments) {
                matches.push(Arc::clone(operation));
            }
        }
    }
    debug!(
        url,
        method = %method,
        provider = provider.as_deref().unwrap_or(UNKNOWN_RESOURCE_PROVIDER),
        candidates = matches.len(),
        "resolved potential operations"
    );
    matches
}

/// Caller-side post-filter for ambiguous structural matches: the template
/// with the fewest placeholder segments wins; ties keep the earliest result.
pub fn most_specific(operations: &[Arc<Operation>]) -> Option<&Arc<Operation>> {
    operations
        .iter()
        .min_by_key(|operation| operation.template.parameter_count())
}

/// Candidate provider of a concrete request path: the segment after the
/// `providers` marker, lowercased.
fn provider_in_path(segments: &[&str]) -> Option<String> {
    let marker = segments
        .iter()
        .position(|segment| segment.eq_ignore_ascii_case(PROVIDERS_MARKER))?;
    segments
        .get(marker + 1)
        .map(|namespace| namespace.to_ascii_lowercase())
}
