//! Error types for the DTN codecs.

use thiserror::Error;

/// Errors produced while encoding or decoding DTN documents.
///
/// Batch animation import catches these per file and turns them into failure
/// counts; everything else is fatal to its single operation and carries
/// enough context to locate the offending entity.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Required field missing or structurally invalid (e.g. `channels` is
    /// not an array).
    #[error("bad DTN document '{file}': {reason}")]
    MalformedDocument { file: String, reason: String },

    /// An animation with this name is already registered in the project.
    #[error("animation already exists: {name}")]
    DuplicateName { name: String },

    /// A cube has a negative `to - from` extent on some axis, which the DTN
    /// format cannot represent.
    #[error("cube \"{cube}\" has a negative size; fix its from/to bounds before exporting")]
    NegativeSize { cube: String },

    /// The operation exists on the surface but has no implementation.
    #[error("{what} is not supported")]
    Unsupported { what: &'static str },
}
