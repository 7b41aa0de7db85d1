//! Validator options: the canonical configuration the rest of the engine
//! consumes, resolved from an optional, dynamically-shaped input object.
//!
//! Resolution is a pure function: defaults are applied for every omitted
//! field, shape violations fail synchronously before any I/O, and the
//! resolved value is immutable. Error messages carry the literal expected
//! type name (`"object"`, `"array"`, `"string"`, `"boolean"`) so callers can
//! distinguish misconfiguration categories programmatically.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

pub use corpus::{GitSource, DEFAULT_SPECS_REPOSITORY};

/// Shape violation in user-supplied options. Always recoverable by supplying
/// corrected configuration; never partially applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("option \"{field}\" must be of type \"{expected}\"")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}

fn type_mismatch(field: &str, expected: &'static str) -> OptionsError {
    OptionsError::TypeMismatch {
        field: field.to_string(),
        expected,
    }
}

/// Fully-resolved validator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Explicit swagger document locations. When non-empty these take
    /// precedence over directory acquisition.
    pub swagger_paths: Vec<String>,
    /// Fallback acquisition source.
    pub git: GitSource,
    /// Local root for specification storage and acquisition.
    pub directory: PathBuf,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            swagger_paths: Vec::new(),
            git: GitSource::default(),
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    std::env::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("repo")
}

impl ValidatorOptions {
    /// Resolve a partial options object into a canonical configuration.
    ///
    /// Accepted keys are the wire shape of the original options object:
    /// `swaggerPaths` (array of strings), `git` (`url` string, `shouldClone`
    /// boolean), and `directory` (string). Unknown keys are ignored.
    pub fn resolve(raw: Option<&Value>) -> Result<Self, OptionsError> {
        let mut options = Self::default();
        let Some(raw) = raw else {
            return Ok(options);
        };
        let map = raw
            .as_object()
            .ok_or_else(|| type_mismatch("options", "object"))?;

        if let Some(paths) = map.get("swaggerPaths") {
            let paths = paths
                .as_array()
                .ok_or_else(|| type_mismatch("swaggerPaths", "array"))?;
            options.swagger_paths = paths
                .iter()
                .map(|entry| {
                    entry
                        .as_str()
                        .map(str::to_string)
                        .ok_or_else(|| type_mismatch("swaggerPaths", "string"))
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(git) = map.get("git") {
            let git = git.as_object().ok_or_else(|| type_mismatch("git", "object"))?;
            if let Some(url) = git.get("url") {
                options.git.url = url
                    .as_str()
                    .ok_or_else(|| type_mismatch("git.url", "string"))?
                    .to_string();
            }
            if let Some(should_clone) = git.get("shouldClone") {
                options.git.should_clone = should_clone
                    .as_bool()
                    .ok_or_else(|| type_mismatch("git.shouldClone", "boolean"))?;
            }
        }

        if let Some(directory) = map.get("directory") {
            options.directory = PathBuf::from(
                directory
                    .as_str()
                    .ok_or_else(|| type_mismatch("directory", "string"))?,
            );
        }

        Ok(options)
    }
}
