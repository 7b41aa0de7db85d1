use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::error::SwaggerError;
use crate::template::{Method, PathTemplate};

/// Per-operation extension that overrides the document's declared version.
const API_VERSION_OVERRIDE_KEY: &str = "x-ms-api-version";

/// One declared HTTP operation from one swagger document.
///
/// Created during document parsing and immutable afterwards; the index and
/// matcher layers share these via `Arc` and never mutate them.
#[derive(Debug, Clone)]
pub struct Operation {
    /// The document this operation was declared in.
    pub document: PathBuf,
    /// `operationId`, when the document declares one.
    pub id: Option<String>,
    pub method: Method,
    pub template: PathTemplate,
    /// Declared API version, normally the document's `info.version`.
    pub api_version: String,
    /// The raw operation object (parameters, responses, schema references),
    /// opaque to the matching engine and handed to the payload validator.
    pub schema: Arc<Value>,
}

/// A parsed swagger document: its declared version plus the flat list of
/// operations it contributes to the corpus.
#[derive(Debug, Clone)]
pub struct SwaggerDocument {
    pub path: PathBuf,
    /// `info.version` of the document.
    pub api_version: String,
    /// Declaration order is preserved: path order in the document, then verb
    /// order within each path item.
    pub operations: Vec<Arc<Operation>>,
}

impl SwaggerDocument {
    /// Read and decompose a document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SwaggerError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SwaggerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| SwaggerError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(path, value)
    }

    /// Decompose an already-deserialized document. `path` is recorded as the
    /// document identity carried by every operation and error.
    pub fn from_value(path: impl AsRef<Path>, value: Value) -> Result<Self, SwaggerError> {
        let path = path.as_ref();
        let shape = |detail: &str| SwaggerError::Shape {
            path: path.to_path_buf(),
            detail: detail.to_string(),
        };

        let root = value
            .as_object()
            .ok_or_else(|| shape("document root is not an object"))?;
        let api_version = root
            .get("info")
            .and_then(|info| info.get("version"))
            .and_then(Value::as_str)
            .ok_or_else(|| shape("missing info.version"))?
            .to_string();
        let paths = root
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| shape("missing paths object"))?;

        let mut operations = Vec::new();
        for (declared_path, item) in paths {
            let item = item
                .as_object()
                .ok_or_else(|| shape(&format!("path item {declared_path} is not an object")))?;
            let template = PathTemplate::parse(declared_path);
            for (key, definition) in item {
                // Path items also carry `parameters` and `x-*` extensions;
                // only verb keys declare operations.
                let Some(method) = Method::parse(key) else {
                    continue;
                };
                let definition = definition.as_object().ok_or_else(|| {
                    shape(&format!("operation {key} {declared_path} is not an object"))
                })?;
                let id = definition
                    .get("operationId")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let api_version = definition
                    .get(API_VERSION_OVERRIDE_KEY)
                    .and_then(Value::as_str)
                    .unwrap_or(&api_version)
                    .to_string();
                operations.push(Arc::new(Operation {
                    document: path.to_path_buf(),
                    id,
                    method,
                    template: template.clone(),
                    api_version,
                    schema: Arc::new(Value::Object(definition.clone())),
                }));
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            api_version,
            operations,
        })
    }
}
