//! Relay error taxonomy.
//!
//! Two failures terminate a session: the bounded continuation loop
//! hitting its cap, and a provider call failing outright. They are
//! distinct variants so operators and tests can tell a policy ceiling
//! apart from a transport failure. Consumer disconnects are not errors.

use thiserror::Error;

/// An error terminating a continuation session.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The session hit its continuation cap while the provider kept
    /// reporting length-truncated output.
    #[error("maximum continuation segments reached ({segments} segments)")]
    ContinuationCap {
        /// Total segments issued, including the initial one.
        segments: usize,
    },

    /// A provider call failed (transport, auth, malformed response).
    /// Never retried; partial output already delivered stands.
    #[error("provider call failed: {0}")]
    Provider(#[source] anyhow::Error),
}
