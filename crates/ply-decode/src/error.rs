//! Error types for PLY decoding.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while decoding a PLY mesh.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The header is missing a required declaration, has a non-numeric count,
    /// or ends before `end_header`.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The body does not match the header: truncated records, unparsable
    /// tokens, or index values that are out of range.
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// The `format` line names an encoding other than ASCII or binary
    /// little-endian.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The file passed to `load_mesh_from_path` could not be opened.
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read failed for a reason other than running out of input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl DecodeError {
    /// Map a read failure in the body to the error it implies.
    ///
    /// Running out of bytes means the body is shorter than the header
    /// declared, which is a malformed body rather than an I/O fault.
    pub(crate) fn truncated(err: io::Error, what: impl FnOnce() -> String) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::MalformedBody(format!("stream ended inside {}", what()))
        } else {
            Self::Io(err)
        }
    }
}
