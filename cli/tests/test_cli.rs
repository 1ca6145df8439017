use std::net::SocketAddr;

use assert_cmd::Command;
use mock_server::{MockOptions, MOCK_PDF_HEADER};
use predicates::prelude::*;

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

fn office2pdf(addr: SocketAddr) -> Command {
    let mut cmd = Command::cargo_bin("office2pdf").unwrap();
    cmd.env("OFFICE2PDF_BASE_URL", format!("http://{addr}"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn convert_writes_pdf_next_to_input() {
    let addr = start_server(MockOptions::default());
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("memo.docx");
    std::fs::write(&input, b"docx bytes").unwrap();

    office2pdf(addr)
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("memo.pdf"));

    let pdf = std::fs::read(dir.path().join("memo.pdf")).unwrap();
    assert!(pdf.starts_with(MOCK_PDF_HEADER));
}

#[test]
fn convert_rejects_unsupported_type() {
    let addr = start_server(MockOptions::default());
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("image.png");
    std::fs::write(&input, b"png").unwrap();

    office2pdf(addr)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not supported"));

    assert!(!dir.path().join("out.pdf").exists());
}

#[test]
fn convert_missing_input_fails() {
    let addr = start_server(MockOptions::default());
    let dir = tempfile::tempdir().unwrap();

    office2pdf(addr)
        .arg("convert")
        .arg(dir.path().join("missing.docx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read local file"));
}

#[test]
fn health_reports_up_and_down() {
    let up = start_server(MockOptions::default());
    office2pdf(up)
        .arg("health")
        .assert()
        .success()
        .stdout("up\n");

    let down = start_server(MockOptions {
        healthy: false,
        ..MockOptions::default()
    });
    office2pdf(down)
        .arg("health")
        .assert()
        .failure()
        .stdout("down\n");
}

#[test]
fn convert_pdf_in_place_keeps_input() {
    let addr = start_server(MockOptions::default());
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("x.pdf");
    std::fs::write(&input, b"ORIGINAL-CONTENT").unwrap();

    office2pdf(addr)
        .arg("convert")
        .arg(&input)
        .arg("--skip-type-check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("destination is the source file"));

    assert_eq!(std::fs::read(&input).unwrap(), b"ORIGINAL-CONTENT");
}
