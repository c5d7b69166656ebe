//! Error type for the polygon editor.
//!
//! Almost every editor operation is total: stale references, empty history and
//! short pending sequences are silent no-ops. The variants below cover the few
//! places where a caller has to learn that something did not happen.

use thiserror::Error;

/// Errors surfaced by the editor.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The host could not provide a rendering surface. Construction is aborted.
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A configuration document could not be parsed.
    #[error("invalid editor configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// The editor was destroyed and can no longer be used.
    #[error("editor has been destroyed")]
    Destroyed,
}
