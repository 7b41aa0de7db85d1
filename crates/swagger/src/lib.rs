//! # ARM swagger document model (`swagger`)
//!
//! ## Purpose
//!
//! `swagger` is the parsing collaborator of the armlive pipeline. It reads a
//! swagger (OpenAPI 2.0) document and decomposes it into the pieces the index
//! and matcher layers care about:
//!
//! - [`PathTemplate`]: a declared path split into literal and parameter
//!   segments, with case-insensitive structural matching against concrete
//!   request paths.
//! - [`Method`]: the HTTP verbs a path item may declare, parsed
//!   case-insensitively.
//! - [`Operation`]: one declared (template, method) pair together with its
//!   owning document, API version, and an opaque schema handle for the
//!   downstream payload validator.
//! - [`SwaggerDocument`]: the parsed document, exposing its declared API
//!   version and the flat list of operations it contributes.
//!
//! Everything else in a document (definitions, parameters, responses) is kept
//! untouched inside each operation's [`Operation::schema`] value; this crate
//! never interprets JSON Schema.
//!
//! ## Example
//!
//! ```
//! use swagger::{Method, SwaggerDocument};
//! use serde_json::json;
//!
//! let doc = SwaggerDocument::from_value(
//!     "specs/storage.json",
//!     json!({
//!         "info": { "version": "2015-06-15" },
//!         "paths": {
//!             "/subscriptions/{subscriptionId}/providers/Microsoft.Storage/storageAccounts": {
//!                 "get": { "operationId": "StorageAccounts_List" }
//!             }
//!         }
//!     }),
//! )
//! .unwrap();
//!
//! assert_eq!(doc.api_version, "2015-06-15");
//! assert_eq!(doc.operations.len(), 1);
//! assert_eq!(doc.operations[0].method, Method::Get);
//! assert!(doc.operations[0]
//!     .template
//!     .matches(&["subscriptions", "abc", "providers", "microsoft.storage", "storageAccounts"]));
//! ```

mod document;
mod error;
mod template;

pub use crate::document::{Operation, SwaggerDocument};
pub use crate::error::SwaggerError;
pub use crate::template::{Method, PathTemplate, Segment, PROVIDERS_MARKER};
