//! Umbrella crate for armlive: live-traffic validation against a swagger
//! corpus for ARM-style resource-management APIs.
//!
//! [`LiveValidator`] stitches the layers together: options resolution
//! ([`ValidatorOptions`]), corpus acquisition (`corpus`), document parsing
//! (`swagger`), operation indexing (`index`), and request matching
//! (`matcher`). A typical caller builds a validator, awaits
//! [`LiveValidator::initialize`] once, then calls
//! [`LiveValidator::get_potential_operations`] per observed request —
//! matching is synchronous, read-only, and safe to share across threads.
//!
//! Payload validation itself is a collaborator behind the
//! [`PayloadValidator`] trait; this crate's obligation ends at delivering the
//! correctly matched operation descriptors.

mod options;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use swagger::SwaggerDocument;

pub use crate::options::{OptionsError, ValidatorOptions};
pub use corpus::{CorpusError, GitSource, DEFAULT_SPECS_REPOSITORY};
pub use index::{OperationIndex, UNKNOWN_API_VERSION, UNKNOWN_RESOURCE_PROVIDER};
pub use matcher::{most_specific, RequestParts, API_VERSION_QUERY_KEY};
pub use swagger::{Method, Operation, PathTemplate, Segment, SwaggerError};

/// Initialization failure: either the corpus could not be acquired or one of
/// its documents could not be parsed. The previous index (if any) stays in
/// place; no partial index is ever exposed.
#[derive(Debug, Error)]
pub enum InitializeError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Swagger(#[from] SwaggerError),

    #[error("initialization task failed: {0}")]
    Task(String),
}

/// One observed request/response exchange handed to payload validation.
#[derive(Debug, Clone)]
pub struct LiveRequest {
    pub url: String,
    pub method: String,
    pub body: Option<Value>,
}

/// Conformance result produced by the payload-validation collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub successful: bool,
    pub errors: Vec<Value>,
}

/// External payload-validation collaborator. Given a matched operation and
/// the observed exchange, it judges schema conformance; the engine only
/// guarantees the operation was correctly matched.
pub trait PayloadValidator: Send + Sync {
    fn validate(&self, operation: &Operation, request: &LiveRequest) -> ValidationOutcome;
}

/// Live validator: owns the resolved options and the operation index.
///
/// The index is empty until [`initialize`](Self::initialize) completes;
/// issuing matches before that simply finds nothing. Re-initializing rebuilds
/// the index from scratch and replaces it wholesale.
#[derive(Debug, Default)]
pub struct LiveValidator {
    options: ValidatorOptions,
    index: OperationIndex,
}

impl LiveValidator {
    /// Build a validator from an optional, partially-specified options
    /// object. Fails fast on shape violations; performs no I/O.
    pub fn new(raw_options: Option<&Value>) -> Result<Self, OptionsError> {
        Ok(Self::with_options(ValidatorOptions::resolve(raw_options)?))
    }

    /// Build a validator from already-resolved options.
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            options,
            index: OperationIndex::new(),
        }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Diagnostic read access to the operation index, keyed by provider, API
    /// version, and method.
    pub fn cache(&self) -> &OperationIndex {
        &self.index
    }

    /// Acquire the corpus, parse every document, and build the operation
    /// index. Any failure aborts the whole build and leaves the previous
    /// index untouched. Repeated calls rebuild from scratch.
    pub async fn initialize(&mut self) -> Result<(), InitializeError> {
        let documents = corpus::acquire(
            self.options.directory.clone(),
            self.options.git.clone(),
            self.options.swagger_paths.clone(),
        )
        .await?;

        // Parsing is file I/O plus JSON work; keep it off the async threads.
        let parsed = tokio::task::spawn_blocking(move || {
            documents
                .iter()
                .map(SwaggerDocument::from_file)
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|join| InitializeError::Task(join.to_string()))??;

        let index = OperationIndex::build(&parsed);
        info!(
            operations = index.len(),
            providers = index.provider_count(),
            "live validator initialized"
        );
        self.index = index;
        Ok(())
    }

    /// Declared operations whose path template structurally matches the
    /// observed request. Empty when nothing was declared for this traffic.
    pub fn get_potential_operations(&self, url: &str, method: &str) -> Vec<Arc<Operation>> {
        matcher::potential_operations(&self.index, url, method)
    }

    /// Match the request and hand every candidate operation to the payload
    /// validator, collecting per-operation outcomes.
    pub fn validate(
        &self,
        request: &LiveRequest,
        validator: &dyn PayloadValidator,
    ) -> Vec<(Arc<Operation>, ValidationOutcome)> {
        self.get_potential_operations(&request.url, &request.method)
            .into_iter()
            .map(|operation| {
                let outcome = validator.validate(&operation, request);
                (operation, outcome)
            })
            .collect()
    }
}
