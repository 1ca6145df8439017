//! Error types for the office2pdf client.
//!
//! # Design
//! Each failure a caller can observe from `convert` or the file helpers maps
//! to exactly one variant, and every variant carries a stable `ErrorCode` so
//! callers can branch without matching on messages. Underlying causes
//! (transport errors, the service's diagnostic body, I/O errors) are kept as
//! `source()` rather than flattened into strings.
//!
//! The health check never produces these errors; see `health::reduce_health`.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::http::TransportError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by `Office2PdfClient` conversion calls and file helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file name's extension is not one the service converts.
    #[error("the file '{filename}' is not supported")]
    UnsupportedFileType { filename: String },

    /// The transport could not complete the request.
    #[error("an error occurred while sending the request to the office2pdf service")]
    Transport(#[source] TransportError),

    /// The service answered with a status other than 200.
    #[error("the office2pdf service returned an error {status}")]
    Upstream {
        status: u16,
        #[source]
        detail: UpstreamDetail,
    },

    /// A local path could not be opened or written.
    #[error("cannot {access} local file '{}'", .path.display())]
    LocalFile {
        path: PathBuf,
        access: FileAccess,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::UnsupportedFileType { .. } => ErrorCode::UnsupportedFileType,
            Error::Transport(_) => ErrorCode::Transport,
            Error::Upstream { .. } => ErrorCode::Upstream,
            Error::LocalFile { .. } => ErrorCode::LocalFile,
        }
    }

    /// HTTP status of an `Upstream` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Response body of a failed conversion, kept as diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{body}")]
pub struct UpstreamDetail {
    body: String,
}

impl UpstreamDetail {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Direction of a failed local file access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    Read,
    Write,
}

impl fmt::Display for FileAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAccess::Read => f.write_str("read"),
            FileAccess::Write => f.write_str("write"),
        }
    }
}

/// Stable discriminant of an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    UnsupportedFileType = 1,
    Transport = 2,
    Upstream = 3,
    LocalFile = 4,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnsupportedFileType => "unsupported_file_type",
            ErrorCode::Transport => "transport",
            ErrorCode::Upstream => "upstream",
            ErrorCode::LocalFile => "local_file",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
