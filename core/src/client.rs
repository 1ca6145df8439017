//! Conversion client for the office2pdf service.
//!
//! # Design
//! `Office2PdfClient` holds only a `base_url` and an injected `Transport`, and
//! carries no mutable state between calls. Each call builds its own
//! `HttpRequest`, makes exactly one transport round-trip and interprets the
//! `HttpResponse`; there are no retries. Endpoint URIs are resolved per call.
//!
//! `convert` reports one of `UnsupportedFileType`, `Transport` or `Upstream`
//! on failure. The health check goes through `health::reduce_health` and
//! never fails.

use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::endpoint::{self, Endpoint};
use crate::error::{Error, Result, UpstreamDetail};
use crate::extensions;
use crate::files;
use crate::health::{self, HealthStatus};
use crate::http::{HttpMethod, HttpRequest, ResponseBody, Transport};
use crate::multipart;

/// Part filename used when the caller does not name the content.
pub const DEFAULT_FILENAME: &str = "file";

/// Synchronous client for the office2pdf API.
///
/// Safe to share between threads whenever the transport is.
#[derive(Debug, Clone)]
pub struct Office2PdfClient<T> {
    base_url: String,
    transport: T,
}

/// Content to convert plus the options that go with it.
#[derive(Debug)]
pub struct ConversionRequest<R> {
    content: R,
    filename: String,
    skip_type_check: bool,
}

impl<R: Read> ConversionRequest<R> {
    pub fn new(content: R) -> Self {
        Self {
            content,
            filename: DEFAULT_FILENAME.to_string(),
            skip_type_check: false,
        }
    }

    /// File name sent with the upload and used for the extension check.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn skip_type_check(mut self, skip: bool) -> Self {
        self.skip_type_check = skip;
        self
    }
}

/// PDF bytes streamed from the service. Read it to the end or drop it.
#[derive(Debug)]
pub struct PdfStream {
    body: ResponseBody,
}

impl PdfStream {
    pub fn into_inner(self) -> ResponseBody {
        self.body
    }
}

impl Read for PdfStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl<T: Transport> Office2PdfClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Self {
        Self::new(config.base_url.clone(), transport)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoint_uri(&self, endpoint: Endpoint) -> String {
        endpoint::resolve(&self.base_url, endpoint.name())
    }

    /// See [`extensions::supports`].
    pub fn supports(&self, filename: &str, strict: bool) -> bool {
        extensions::supports(filename, strict)
    }

    /// Convert `content` to PDF.
    ///
    /// Unless `skip_type_check` is set, a `filename` whose extension is not
    /// supported fails with `UnsupportedFileType` before any request is made.
    pub fn convert(
        &self,
        content: impl Read,
        filename: &str,
        skip_type_check: bool,
    ) -> Result<PdfStream> {
        check_type(filename, skip_type_check)?;
        self.send_conversion(content, filename)
    }

    pub fn convert_with<R: Read>(&self, request: ConversionRequest<R>) -> Result<PdfStream> {
        self.convert(request.content, &request.filename, request.skip_type_check)
    }

    /// Convert the file at `source` and write the PDF to `destination`.
    ///
    /// The source is opened and the destination directory checked before the
    /// service is contacted. The PDF is staged next to `destination` and only
    /// replaces it after a complete download, so a failed conversion leaves
    /// any existing file untouched. Returns the number of PDF bytes written.
    pub fn convert_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        skip_type_check: bool,
    ) -> Result<u64> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        let input = files::open_source(source)?;
        let filename = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        check_type(&filename, skip_type_check)?;
        files::ensure_distinct(source, destination)?;

        let mut staged = files::stage_destination(destination)?;
        let mut pdf = self.send_conversion(input, &filename)?;
        let written = files::write_stream(&mut pdf, staged.as_file_mut(), destination)?;
        files::commit_destination(staged, destination)?;
        debug!("converted {} to {}", source.display(), destination.display());
        Ok(written)
    }

    /// Query `/health`. Every failure reads as down.
    pub fn health(&self) -> HealthStatus {
        let request = HttpRequest {
            method: HttpMethod::Get,
            uri: self.endpoint_uri(Endpoint::Health),
            headers: Vec::new(),
            body: None,
        };
        health::reduce_health(self.transport.send(request))
    }

    pub fn is_healthy(&self) -> bool {
        self.health().is_up
    }

    fn send_conversion(&self, content: impl Read, filename: &str) -> Result<PdfStream> {
        let body = multipart::encode(content, filename)
            .map_err(|err| Error::Transport(Box::new(err)))?;
        let request = HttpRequest {
            method: HttpMethod::Post,
            uri: self.endpoint_uri(Endpoint::Convert),
            headers: vec![("content-type".to_string(), body.content_type())],
            body: Some(body.into_bytes()),
        };
        debug!("POST {} ({filename})", request.uri);

        let mut response = self.transport.send(request).map_err(|err| {
            warn!("conversion request failed: {err}");
            Error::Transport(err)
        })?;

        if response.status != 200 {
            let detail = response
                .body
                .read_to_string_lossy()
                .unwrap_or_else(|err| format!("<unreadable response body: {err}>"));
            warn!("conversion of {filename} failed with status {}", response.status);
            return Err(Error::Upstream {
                status: response.status,
                detail: UpstreamDetail::new(detail),
            });
        }

        Ok(PdfStream {
            body: response.body,
        })
    }
}

#[cfg(feature = "ureq")]
impl Office2PdfClient<crate::transport::UreqTransport> {
    /// Client using the built-in blocking `ureq` transport.
    pub fn with_default_transport(base_url: impl Into<String>) -> Self {
        Self::new(base_url, crate::transport::UreqTransport::new())
    }
}

fn check_type(filename: &str, skip_type_check: bool) -> Result<()> {
    if skip_type_check || extensions::supports(filename, false) {
        return Ok(());
    }
    Err(Error::UnsupportedFileType {
        filename: filename.to_string(),
    })
}
