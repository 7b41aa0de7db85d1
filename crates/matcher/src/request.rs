/// Query parameter carrying the API version in the ARM addressing convention.
pub const API_VERSION_QUERY_KEY: &str = "api-version";

/// An observed request url reduced to what matching needs: its path segments
/// and its declared API version. Scheme, host, and fragment are discarded.
///
/// Parsing never fails; a degenerate url simply yields no segments and no
/// version, which downstream produces an empty match result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParts {
    pub segments: Vec<String>,
    pub api_version: Option<String>,
}

impl RequestParts {
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        let (before_query, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };

        // Drop "scheme://host"; everything from the first slash after the
        // authority is the path. A url without a scheme is taken as a path.
        let path = match before_query.split_once("://") {
            Some((_scheme, rest)) => rest.split_once('/').map(|(_host, p)| p).unwrap_or(""),
            None => before_query,
        };

        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let api_version = query.and_then(|query| {
            query.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                (key.eq_ignore_ascii_case(API_VERSION_QUERY_KEY) && !value.is_empty())
                    .then(|| value.to_string())
            })
        });

        Self {
            segments,
            api_version,
        }
    }
}
