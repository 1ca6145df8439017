//! `multipart/form-data` encoding of a single uploaded file.
//!
//! # Design
//! The service expects one part named `file`. The part always declares
//! `Content-Type: application/pdf`; the service works out the real format
//! from the file name and content, so the declared type is not meaningful
//! and must not be changed to the source's MIME type.
//!
//! The source is read once, up front, into the body buffer. Nothing from the
//! caller's reader is retained after `encode` returns.

use std::io::{self, Read};

use uuid::Uuid;

/// Form field name the service reads the upload from.
pub const FIELD_NAME: &str = "file";

/// Content type declared on the uploaded part.
pub const PART_CONTENT_TYPE: &str = "application/pdf";

/// An encoded request body and the boundary that delimits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Value for the enclosing request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encode `content` as the `file` part of a form upload named `filename`.
pub fn encode(mut content: impl Read, filename: &str) -> io::Result<MultipartBody> {
    let mut data = Vec::new();
    content.read_to_end(&mut data)?;

    let mut boundary = new_boundary();
    while contains(&data, boundary.as_bytes()) {
        boundary = new_boundary();
    }

    let mut bytes = Vec::with_capacity(data.len() + 256);
    bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    bytes.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{FIELD_NAME}\"; filename=\"{}\"\r\n",
            escape_quoted(filename)
        )
        .as_bytes(),
    );
    bytes.extend_from_slice(format!("Content-Type: {PART_CONTENT_TYPE}\r\n\r\n").as_bytes());
    bytes.extend_from_slice(&data);
    bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Ok(MultipartBody { boundary, bytes })
}

fn new_boundary() -> String {
    Uuid::new_v4().simple().to_string()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Percent-encode the characters that would break a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("%22"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            other => escaped.push(other),
        }
    }
    escaped
}
