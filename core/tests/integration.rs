//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in a background thread, then
//! drives the real `UreqTransport` through `Office2PdfClient`. The mock
//! rejects uploads that are not a single `file` part declared
//! `application/pdf`, and echoes accepted bytes behind a PDF header, so a
//! successful conversion proves the multipart body decodes back to the
//! original content.

use std::io::Read;
use std::net::SocketAddr;

use mock_server::{MockOptions, MOCK_PDF_HEADER, UPLOAD_CONTENT_TYPE_HEADER, UPLOAD_FILENAME_HEADER};
use office2pdf_client::{
    multipart, Error, ErrorCode, HttpMethod, HttpRequest, Office2PdfClient, Transport,
    UreqTransport,
};

/// Start the mock server on a random port and return its address.
fn start_server(options: MockOptions) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, options).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> Office2PdfClient<UreqTransport> {
    Office2PdfClient::with_default_transport(format!("http://{addr}/"))
}

fn sample_docx() -> Vec<u8> {
    let mut bytes = b"PK\x03\x04".to_vec();
    bytes.extend((0u8..=255).cycle().take(4096));
    bytes
}

#[test]
fn convert_round_trip() {
    let addr = start_server(MockOptions::default());
    let source = sample_docx();

    let mut pdf = Vec::new();
    client(addr)
        .convert(source.as_slice(), "report.docx", false)
        .unwrap()
        .read_to_end(&mut pdf)
        .unwrap();

    assert!(pdf.starts_with(MOCK_PDF_HEADER));
    assert_eq!(&pdf[MOCK_PDF_HEADER.len()..], source.as_slice());
}

#[test]
fn multipart_part_metadata_reaches_server() {
    let addr = start_server(MockOptions::default());
    let body = multipart::encode(&b"hello"[..], "notes.txt").unwrap();

    let response = UreqTransport::new()
        .send(HttpRequest {
            method: HttpMethod::Post,
            uri: format!("http://{addr}/convert"),
            headers: vec![("content-type".to_string(), body.content_type())],
            body: Some(body.into_bytes()),
        })
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.header(UPLOAD_FILENAME_HEADER), Some("notes.txt"));
    assert_eq!(response.header(UPLOAD_CONTENT_TYPE_HEADER), Some("application/pdf"));
}

#[test]
fn upstream_error_carries_status_and_body() {
    let addr = start_server(MockOptions {
        convert_status: Some(500),
        ..MockOptions::default()
    });

    let err = client(addr)
        .convert(&b"data"[..], "sheet.xlsx", false)
        .unwrap_err();
    match err {
        Error::Upstream { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail.body(), "conversion failed with forced status 500");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unreachable_service_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let c = client(addr);
    let err = c.convert(&b"data"[..], "a.doc", false).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Transport);
    assert!(!c.is_healthy());
}

#[test]
fn health_follows_service_state() {
    let up = start_server(MockOptions::default());
    assert!(client(up).is_healthy());

    let down = start_server(MockOptions {
        healthy: false,
        ..MockOptions::default()
    });
    assert!(!client(down).is_healthy());
}

#[test]
fn convert_file_writes_pdf() {
    let addr = start_server(MockOptions::default());
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("letter.odt");
    let destination = dir.path().join("letter.pdf");
    std::fs::write(&source, b"odt content").unwrap();

    let written = client(addr)
        .convert_file(&source, &destination, false)
        .unwrap();

    let pdf = std::fs::read(&destination).unwrap();
    assert_eq!(written, pdf.len() as u64);
    assert_eq!(&pdf[MOCK_PDF_HEADER.len()..], b"odt content");
}

#[test]
fn convert_file_failure_removes_destination() {
    let addr = start_server(MockOptions {
        convert_status: Some(422),
        ..MockOptions::default()
    });
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("letter.doc");
    let destination = dir.path().join("letter.pdf");
    std::fs::write(&source, b"doc content").unwrap();

    let err = client(addr)
        .convert_file(&source, &destination, false)
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert!(!destination.exists());
}
