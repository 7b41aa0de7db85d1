//! # Specification corpus acquisition (`corpus`)
//!
//! ## Purpose
//!
//! `corpus` turns a validator configuration into the ordered list of swagger
//! documents that actually exist on disk. It is consumed exactly once per
//! `initialize` call and performs all of the engine's I/O:
//!
//! - explicit `swagger_paths` win over everything else; entries that do not
//!   exist are skipped with a warning,
//! - otherwise the configured [`GitSource`] may be cloned into the root
//!   directory (a populated directory is reused as-is),
//! - the root directory is then walked recursively for `*.json` documents,
//!   skipping any directory named `examples` (sample payloads, not specs).
//!
//! The returned list is deterministic: explicit paths keep their given order,
//! walked paths are sorted. Filesystem and git work runs on the blocking
//! thread pool so [`acquire`] stays non-blocking for async callers.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default specification repository, cloned only when `should_clone` is set.
pub const DEFAULT_SPECS_REPOSITORY: &str = "https://github.com/Azure/azure-rest-api-specs.git";

/// Directory name excluded from the corpus walk. Swagger repositories keep
/// sample request/response payloads under `examples/`.
const EXAMPLES_DIR: &str = "examples";

/// Fallback acquisition source for the specification corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSource {
    pub url: String,
    pub should_clone: bool,
}

impl Default for GitSource {
    fn default() -> Self {
        Self {
            url: DEFAULT_SPECS_REPOSITORY.to_string(),
            should_clone: false,
        }
    }
}

/// Acquisition failure. Initialization aborts on the first one; no partial
/// corpus is ever returned.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to clone specification repository {url}: {detail}")]
    Clone { url: String, detail: String },

    #[error("failed to read specification directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus acquisition task failed: {0}")]
    Task(String),
}

/// Resolve the list of swagger documents for one initialization.
///
/// See the crate docs for the precedence rules. The heavy lifting happens on
/// `spawn_blocking`; the future itself never blocks.
pub async fn acquire(
    directory: PathBuf,
    git: GitSource,
    swagger_paths: Vec<String>,
) -> Result<Vec<PathBuf>, CorpusError> {
    tokio::task::spawn_blocking(move || acquire_blocking(&directory, &git, &swagger_paths))
        .await
        .map_err(|join| CorpusError::Task(join.to_string()))?
}

fn acquire_blocking(
    directory: &Path,
    git: &GitSource,
    swagger_paths: &[String],
) -> Result<Vec<PathBuf>, CorpusError> {
    if !swagger_paths.is_empty() {
        let documents: Vec<PathBuf> = swagger_paths
            .iter()
            .map(PathBuf::from)
            .filter(|path| {
                let exists = path.is_file();
                if !exists {
                    warn!(path = %path.display(), "configured swagger path does not exist, skipping");
                }
                exists
            })
            .collect();
        info!(
            count = documents.len(),
            "using explicitly configured swagger paths"
        );
        return Ok(documents);
    }

    if git.should_clone {
        clone_repository(&git.url, directory)?;
    }

    let mut documents = Vec::new();
    collect_documents(directory, &mut documents)?;
    documents.sort();
    info!(
        count = documents.len(),
        directory = %directory.display(),
        "collected swagger documents"
    );
    Ok(documents)
}

/// Clone `url` into `directory`. A directory that already has entries is
/// assumed to hold a previous clone and reused.
fn clone_repository(url: &str, directory: &Path) -> Result<(), CorpusError> {
    if directory.exists() {
        let mut entries = directory.read_dir().map_err(|source| CorpusError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
        if entries.next().is_some() {
            info!(directory = %directory.display(), "reusing existing specification clone");
            return Ok(());
        }
    }

    info!(url, directory = %directory.display(), "cloning specification repository");
    let output = Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg(url)
        .arg(directory)
        .output()
        .map_err(|err| CorpusError::Clone {
            url: url.to_string(),
            detail: err.to_string(),
        })?;
    if !output.status.success() {
        return Err(CorpusError::Clone {
            url: url.to_string(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

fn collect_documents(directory: &Path, documents: &mut Vec<PathBuf>) -> Result<(), CorpusError> {
    let entries = directory.read_dir().map_err(|source| CorpusError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| CorpusError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            if entry.file_name() == EXAMPLES_DIR {
                debug!(path = %path.display(), "skipping examples directory");
                continue;
            }
            collect_documents(&path, documents)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            documents.push(path);
        }
    }
    Ok(())
}
