use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// First bytes of every document the mock "converts". The uploaded content
/// follows verbatim so tests can check what arrived.
pub const MOCK_PDF_HEADER: &[u8] = b"%PDF-1.4\n%mock\n";

pub const UPLOAD_FILENAME_HEADER: &str = "x-upload-filename";
pub const UPLOAD_CONTENT_TYPE_HEADER: &str = "x-upload-content-type";

const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Behaviour switches for the mock service.
#[derive(Clone, Debug)]
pub struct MockOptions {
    /// Whether `/health` reports `up`.
    pub healthy: bool,
    /// Answer every `/convert` with this status instead of converting.
    pub convert_status: Option<u16>,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            healthy: true,
            convert_status: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

pub fn app() -> Router {
    app_with(MockOptions::default())
}

pub fn app_with(options: MockOptions) -> Router {
    Router::new()
        .route("/convert", post(convert))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(options)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, options: MockOptions) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(options)).await
}

async fn health(State(options): State<MockOptions>) -> Json<HealthResponse> {
    let status = if options.healthy { "up" } else { "down" };
    Json(HealthResponse {
        status: status.to_string(),
    })
}

struct Upload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

async fn convert(State(options): State<MockOptions>, multipart: Multipart) -> Response {
    if let Some(code) = options.convert_status {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, format!("conversion failed with forced status {code}")).into_response();
    }

    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let mut pdf = Vec::with_capacity(MOCK_PDF_HEADER.len() + upload.data.len());
    pdf.extend_from_slice(MOCK_PDF_HEADER);
    pdf.extend_from_slice(&upload.data);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (HeaderName::from_static(UPLOAD_FILENAME_HEADER), upload.filename),
            (HeaderName::from_static(UPLOAD_CONTENT_TYPE_HEADER), upload.content_type),
        ],
        pdf,
    )
        .into_response()
}

/// Accept exactly one part named `file`, declared `application/pdf`, with a
/// filename.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, String> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();
        if name != "file" {
            return Err(format!("unexpected form field '{name}'"));
        }
        if upload.is_some() {
            return Err("more than one file uploaded".to_string());
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| "the file part has no filename".to_string())?;
        let content_type = field.content_type().unwrap_or_default().to_string();
        if content_type != "application/pdf" {
            return Err(format!("unexpected part content type '{content_type}'"));
        }
        let data = field.bytes().await.map_err(|e| e.to_string())?.to_vec();
        upload = Some(Upload {
            filename,
            content_type,
            data,
        });
    }
    upload.ok_or_else(|| "no file uploaded".to_string())
}
