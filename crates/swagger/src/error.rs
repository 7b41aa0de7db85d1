use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while reading or decomposing one swagger document.
///
/// Every variant names the offending document so the caller can fix or
/// exclude it from the corpus.
#[derive(Debug, Error)]
pub enum SwaggerError {
    #[error("failed to read swagger document {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse swagger document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("swagger document {} is malformed: {detail}", path.display())]
    Shape { path: PathBuf, detail: String },
}

impl SwaggerError {
    /// The document this error originated from.
    pub fn path(&self) -> &Path {
        match self {
            SwaggerError::Read { path, .. }
            | SwaggerError::Json { path, .. }
            | SwaggerError::Shape { path, .. } => path,
        }
    }
}
