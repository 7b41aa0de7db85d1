//! # Operation index (`index`)
//!
//! ## Purpose
//!
//! `index` folds the declared operations of a parsed swagger corpus into a
//! three-level container keyed by resource provider, API version, and HTTP
//! method. The matcher layer queries it; nothing mutates it after the build.
//!
//! ## Key concepts
//!
//! - Keys are lowercased strings (provider, version) plus [`Method`].
//! - Operations whose template carries no provider namespace — subscription-
//!   and tenant-scoped generic operations — land under the two sentinel keys
//!   [`UNKNOWN_RESOURCE_PROVIDER`] / [`UNKNOWN_API_VERSION`], regardless of
//!   the version their document declares. The sentinels are ordinary keys:
//!   insertion and lookup use one code path for real and sentinel buckets.
//! - The build is deterministic for a fixed, ordered document list. Bucket
//!   membership order follows document order, then in-document declaration
//!   order.
//! - A rebuild produces a fresh value; callers swap the whole index so
//!   concurrent readers never observe a partially-built one.
//!
//! ## Example
//!
//! ```
//! use index::OperationIndex;
//! use swagger::{Method, SwaggerDocument};
//! use serde_json::json;
//!
//! let doc = SwaggerDocument::from_value(
//!     "media.json",
//!     json!({
//!         "info": { "version": "2015-10-01" },
//!         "paths": {
//!             "/subscriptions/{s}/providers/Microsoft.Media/checkNameAvailability": {
//!                 "post": { "operationId": "CheckNameAvailability" }
//!             }
//!         }
//!     }),
//! )
//! .unwrap();
//!
//! let index = OperationIndex::build(&[doc]);
//! assert_eq!(index.bucket("microsoft.media", "2015-10-01", Method::Post).len(), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use swagger::{Method, Operation, SwaggerDocument};
use tracing::{debug, info};

/// Sentinel provider key for operations whose template carries no
/// resource-provider namespace.
pub const UNKNOWN_RESOURCE_PROVIDER: &str = "microsoft.unknown";

/// Sentinel version key paired with [`UNKNOWN_RESOURCE_PROVIDER`], and used
/// on its own when an operation declares no usable version.
pub const UNKNOWN_API_VERSION: &str = "unknown-api-version";

type MethodBuckets = BTreeMap<Method, Vec<Arc<Operation>>>;
type VersionBuckets = BTreeMap<String, MethodBuckets>;

/// Three-level index: provider → API version → method → declared operations.
#[derive(Debug, Clone, Default)]
pub struct OperationIndex {
    providers: BTreeMap<String, VersionBuckets>,
}

impl OperationIndex {
    /// An empty index; what a validator holds before `initialize`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every operation of every document into a fresh index.
    pub fn build(documents: &[SwaggerDocument]) -> Self {
        let mut index = Self::new();
        for document in documents {
            debug!(
                document = %document.path.display(),
                operations = document.operations.len(),
                "indexing swagger document"
            );
            for operation in &document.operations {
                index.insert(Arc::clone(operation));
            }
        }
        info!(
            operations = index.len(),
            providers = index.provider_count(),
            documents = documents.len(),
            "operation index built"
        );
        index
    }

    fn insert(&mut self, operation: Arc<Operation>) {
        let (provider, version) = match operation.template.resource_provider() {
            // Unscoped operations aggregate under the sentinel pair no matter
            // what version their document declares.
            None => (
                UNKNOWN_RESOURCE_PROVIDER.to_string(),
                UNKNOWN_API_VERSION.to_string(),
            ),
            Some(provider) if operation.api_version.is_empty() => {
                (provider, UNKNOWN_API_VERSION.to_string())
            }
            Some(provider) => (provider, operation.api_version.to_ascii_lowercase()),
        };
        self.providers
            .entry(provider)
            .or_default()
            .entry(version)
            .or_default()
            .entry(operation.method)
            .or_default()
            .push(operation);
    }

    /// Operations declared for an exact (provider, version, method) triple,
    /// in insertion order. Empty for absent buckets.
    pub fn bucket(&self, provider: &str, api_version: &str, method: Method) -> &[Arc<Operation>] {
        self.providers
            .get(provider)
            .and_then(|versions| versions.get(api_version))
            .and_then(|methods| methods.get(&method))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any operation was indexed under this provider key.
    pub fn contains_provider(&self, provider: &str) -> bool {
        self.providers.contains_key(provider)
    }

    /// Indexed provider keys, including the sentinel when present.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Version keys indexed under one provider.
    pub fn versions<'a>(&'a self, provider: &str) -> impl Iterator<Item = &'a str> {
        self.providers
            .get(provider)
            .into_iter()
            .flat_map(|versions| versions.keys().map(String::as_str))
    }

    /// Method keys indexed under one (provider, version) pair.
    pub fn methods<'a>(&'a self, provider: &str, api_version: &str) -> impl Iterator<Item = Method> + 'a {
        self.providers
            .get(provider)
            .and_then(|versions| versions.get(api_version))
            .into_iter()
            .flat_map(|methods| methods.keys().copied())
    }

    /// Total number of indexed operations.
    pub fn len(&self) -> usize {
        self.providers
            .values()
            .flat_map(|versions| versions.values())
            .flat_map(|methods| methods.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn media_doc() -> SwaggerDocument {
        SwaggerDocument::from_value(
            "media.json",
            json!({
                "info": { "version": "2015-10-01" },
                "paths": {
                    "/subscriptions/{subscriptionId}/providers/Microsoft.Media/checkNameAvailability": {
                        "post": { "operationId": "CheckNameAvailability" }
                    },
                    "/subscriptions/{subscriptionId}/resourceGroups/{rg}/providers/Microsoft.Media/mediaservices": {
                        "get": { "operationId": "MediaServices_List" }
                    },
                    "/subscriptions/{subscriptionId}/resourceGroups/{rg}/providers/Microsoft.Media/mediaservices/{name}": {
                        "get": { "operationId": "MediaServices_Get" },
                        "put": { "operationId": "MediaServices_Create" },
                        "delete": { "operationId": "MediaServices_Delete" }
                    }
                }
            }),
        )
        .unwrap()
    }

    fn mixed_doc() -> SwaggerDocument {
        SwaggerDocument::from_value(
            "resources.json",
            json!({
                "info": { "version": "2016-09-01" },
                "paths": {
                    "/subscriptions/{subscriptionId}/resourcegroups": {
                        "get": { "operationId": "ResourceGroups_List" }
                    },
                    "/subscriptions/{subscriptionId}/resourcegroups/{name}": {
                        "put": { "operationId": "ResourceGroups_Create" }
                    },
                    "/subscriptions/{subscriptionId}/providers/{namespace}/register": {
                        "post": { "operationId": "Providers_Register" }
                    },
                    "/subscriptions/{subscriptionId}/resourcegroups/{rg}/providers/Microsoft.Resources/deployments": {
                        "get": { "operationId": "Deployments_List" }
                    }
                }
            }),
        )
        .unwrap()
    }

    #[test]
    fn empty_index_before_build() {
        let index = OperationIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.bucket("microsoft.media", "2015-10-01", Method::Get).is_empty());
    }

    #[test]
    fn scoped_operations_key_on_provider_version_method() {
        let index = OperationIndex::build(&[media_doc()]);
        assert_eq!(index.provider_count(), 1);
        assert_eq!(index.providers().collect::<Vec<_>>(), vec!["microsoft.media"]);
        assert_eq!(
            index.versions("microsoft.media").collect::<Vec<_>>(),
            vec!["2015-10-01"]
        );
        assert_eq!(index.bucket("microsoft.media", "2015-10-01", Method::Get).len(), 2);
        assert_eq!(index.bucket("microsoft.media", "2015-10-01", Method::Put).len(), 1);
        assert_eq!(index.bucket("microsoft.media", "2015-10-01", Method::Post).len(), 1);
        assert_eq!(index.bucket("microsoft.media", "2015-10-01", Method::Delete).len(), 1);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn unscoped_operations_aggregate_under_sentinels() {
        let index = OperationIndex::build(&[mixed_doc()]);
        assert_eq!(index.provider_count(), 2);

        // Declared version 2016-09-01 is ignored for unscoped operations.
        let unknown_versions: Vec<_> = index.versions(UNKNOWN_RESOURCE_PROVIDER).collect();
        assert_eq!(unknown_versions, vec![UNKNOWN_API_VERSION]);
        assert_eq!(
            index
                .bucket(UNKNOWN_RESOURCE_PROVIDER, UNKNOWN_API_VERSION, Method::Get)
                .len(),
            1
        );
        assert_eq!(
            index
                .bucket(UNKNOWN_RESOURCE_PROVIDER, UNKNOWN_API_VERSION, Method::Put)
                .len(),
            1
        );
        // Placeholder after the providers marker is still unscoped.
        assert_eq!(
            index
                .bucket(UNKNOWN_RESOURCE_PROVIDER, UNKNOWN_API_VERSION, Method::Post)
                .len(),
            1
        );
        assert_eq!(
            index
                .bucket("microsoft.resources", "2016-09-01", Method::Get)
                .len(),
            1
        );
    }

    #[test]
    fn bucket_order_follows_declaration_order() {
        let index = OperationIndex::build(&[media_doc()]);
        let gets = index.bucket("microsoft.media", "2015-10-01", Method::Get);
        assert_eq!(gets[0].id.as_deref(), Some("MediaServices_List"));
        assert_eq!(gets[1].id.as_deref(), Some("MediaServices_Get"));
    }

    #[test]
    fn rebuild_from_same_corpus_is_equivalent() {
        let first = OperationIndex::build(&[media_doc(), mixed_doc()]);
        let second = OperationIndex::build(&[media_doc(), mixed_doc()]);
        assert_eq!(
            first.providers().collect::<Vec<_>>(),
            second.providers().collect::<Vec<_>>()
        );
        assert_eq!(first.len(), second.len());
        for provider in first.providers() {
            for version in first.versions(provider) {
                for method in Method::ALL {
                    let a: Vec<_> = first
                        .bucket(provider, version, method)
                        .iter()
                        .map(|op| op.template.raw().to_string())
                        .collect();
                    let b: Vec<_> = second
                        .bucket(provider, version, method)
                        .iter()
                        .map(|op| op.template.raw().to_string())
                        .collect();
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn version_keys_are_lowercased() {
        let doc = SwaggerDocument::from_value(
            "preview.json",
            json!({
                "info": { "version": "2015-05-01-PREVIEW" },
                "paths": {
                    "/subscriptions/{s}/providers/Microsoft.Storage/usages": {
                        "get": { "operationId": "Usages_List" }
                    }
                }
            }),
        )
        .unwrap();
        let index = OperationIndex::build(&[doc]);
        assert_eq!(
            index
                .bucket("microsoft.storage", "2015-05-01-preview", Method::Get)
                .len(),
            1
        );
    }
}
