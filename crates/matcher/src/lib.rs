//! # Request matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the operation index (`index`) and resolves an
//! observed request — a url plus an HTTP method, both compared
//! case-insensitively — to the declared operations whose path template
//! structurally matches it.
//!
//! Matching is a pure function of (index, request): no I/O, no mutation, no
//! errors. A request nothing was declared for yields an empty result, which
//! is the normal "no operation declared for this traffic" signal; it keeps
//! the hot path exception-free and safe for concurrent callers over a shared
//! read-only index.
//!
//! ## Bucket selection
//!
//! The candidate provider is the path segment after the `providers` marker;
//! the candidate version comes from the `api-version` query parameter. The
//! primary bucket is `[provider][version][method]`. Whenever the path does
//! not resolve to a known provider — no namespace in the path, or a namespace
//! the index never saw — the sentinel bucket pair is searched as well, since
//! provider-agnostic operations were indexed there regardless of their
//! declared versions.
//!
//! ## Tie-breaking
//!
//! Multiple structural matches are all returned, primary bucket first, in
//! index insertion order. Callers that need a single best match apply
//! [`most_specific`], which prefers the template with the fewest placeholder
//! segments.

mod engine;
mod request;

pub use crate::engine::{most_specific, potential_operations};
pub use crate::request::{RequestParts, API_VERSION_QUERY_KEY};
