//! Synchronous client for the office2pdf conversion service.
//!
//! # Overview
//! Uploads office documents (`docx`, `xlsx`, `odt`, ...) to a remote
//! office2pdf service as `multipart/form-data` and hands back the converted
//! PDF as a stream. The service does the conversion; this crate only speaks
//! its HTTP protocol.
//!
//! # Design
//! - `Office2PdfClient` is stateless: a `base_url` plus an injected
//!   `Transport` that executes plain-data `HttpRequest`s.
//! - The default transport (`UreqTransport`, feature `ureq`) is picked at
//!   compile time via `Office2PdfClient::with_default_transport`; tests and
//!   hosts with their own HTTP stack pass any `Transport` to `new`.
//! - `convert` fails with a typed `Error`; `is_healthy` never fails.
//! - One request per call, no retries, no buffering of the PDF response.
//!
//! ```no_run
//! use office2pdf_client::Office2PdfClient;
//!
//! let client = Office2PdfClient::with_default_transport("http://localhost:3000");
//! let written = client.convert_file("letter.docx", "letter.pdf", false)?;
//! println!("{written} bytes");
//! # Ok::<(), office2pdf_client::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod extensions;
pub mod files;
pub mod health;
pub mod http;
pub mod multipart;
#[cfg(feature = "ureq")]
pub mod transport;

pub use client::{ConversionRequest, Office2PdfClient, PdfStream, DEFAULT_FILENAME};
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::{Error, ErrorCode, FileAccess, Result, UpstreamDetail};
pub use extensions::{supports, SUPPORTED_EXTENSIONS};
pub use health::HealthStatus;
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody, Transport, TransportError};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
