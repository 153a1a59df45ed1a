//! End-to-end tests for the document pages

mod common;

use std::fs;

use axum::http::StatusCode;
use tempfile::TempDir;

use common::{inflate_declared_size, server, write_report, DocxFixture};

#[tokio::test]
async fn test_empty_directory_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let response = server(dir.path()).get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("No documents yet"));
    assert!(!html.contains("Read more"));
}

#[tokio::test]
async fn test_missing_directory_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let response = server(&dir.path().join("not-created")).get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("No documents yet"));
}

#[tokio::test]
async fn test_listing_shows_each_document_once() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path());
    DocxFixture::new()
        .paragraph("Sleep and memory")
        .paragraph("A scoping review.")
        .write_to(&dir.path().join("sleep_study.docx"));
    fs::write(dir.path().join("notes.txt"), "not a document").unwrap();
    fs::write(dir.path().join("~$report.docx"), "lock").unwrap();

    let html = server(dir.path()).get("/").await.text();

    assert_eq!(html.matches(r#"href="/report""#).count(), 1);
    assert_eq!(html.matches(r#"href="/sleep_study""#).count(), 1);
    assert_eq!(html.matches("Read more").count(), 2);
    assert!(!html.contains("notes"));
    assert!(html.contains(">Results<"));
    assert!(html.contains("Findings here."));
    assert!(html.contains(">Sleep and memory<"));
    assert!(html.contains("A scoping review."));
}

#[tokio::test]
async fn test_listing_survives_corrupt_document() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path());
    fs::write(dir.path().join("broken_file.docx"), "definitely not a zip").unwrap();

    let response = server(dir.path()).get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"href="/broken_file""#));
    assert!(html.contains(">broken file<"));
    assert!(html.contains(r#"href="/report""#));
}

#[tokio::test]
async fn test_view_report_in_order() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path());

    let response = server(dir.path()).get("/report").await;

    response.assert_status_ok();
    let html = response.text();
    let heading = html.find("<h1 class=\"font-bold mt-6 mb-2\">Results</h1>").unwrap();
    let paragraph = html.find("<p class=\"my-2\">Findings here.</p>").unwrap();
    assert!(heading < paragraph);
}

#[tokio::test]
async fn test_view_unknown_document_is_not_found() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path());
    let server = server(dir.path());

    let response = server.get("/missing").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.get("/report.docx").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_view_rejects_path_traversal() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    write_report(dir.path());

    let response = server(&docs).get("/..%2Freport").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_view_corrupt_document_is_server_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.docx"), "definitely not a zip").unwrap();
    write_report(dir.path());
    let server = server(dir.path());

    let response = server.get("/broken").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("broken.docx could not be read"));

    // the server keeps serving after a parse failure
    server.get("/report").await.assert_status_ok();
}

#[tokio::test]
async fn test_view_escapes_document_text() {
    let dir = TempDir::new().unwrap();
    DocxFixture::new()
        .heading(1, "Safe <title>")
        .paragraph("<script>alert('x')</script>")
        .write_to(&dir.path().join("xss.docx"));

    let html = server(dir.path()).get("/xss").await.text();

    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;alert"));
    assert!(html.contains("Safe &lt;title&gt;"));
}

#[tokio::test]
async fn test_view_inline_image() {
    let dir = TempDir::new().unwrap();
    DocxFixture::new()
        .paragraph("Before the figure")
        .image("figure1.png", &[1, 2, 3])
        .paragraph("After the figure")
        .write_to(&dir.path().join("figures.docx"));

    let html = server(dir.path()).get("/figures").await.text();

    let before = html.find("Before the figure").unwrap();
    let image = html.find(r#"<img src="data:image/png;base64,AQID""#).unwrap();
    let after = html.find("After the figure").unwrap();
    assert!(before < image && image < after);
}

#[tokio::test]
async fn test_new_files_picked_up_without_restart() {
    let dir = TempDir::new().unwrap();
    let server = server(dir.path());

    assert_eq!(server.get("/report").await.status_code(), StatusCode::NOT_FOUND);

    write_report(dir.path());
    server.get("/report").await.assert_status_ok();
    assert!(server.get("/").await.text().contains(r#"href="/report""#));

    fs::remove_file(dir.path().join("report.docx")).unwrap();
    assert_eq!(server.get("/report").await.status_code(), StatusCode::NOT_FOUND);
    assert!(!server.get("/").await.text().contains(r#"href="/report""#));
}

#[tokio::test]
async fn test_inflated_entry_size_does_not_crash() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path());
    let mut bytes = DocxFixture::new()
        .paragraph("Plates")
        .image("x.png", &[0x89, b'P', b'N', b'G'])
        .build();
    inflate_declared_size(&mut bytes, "word/media/x.png", 0xFFFF_FFF0);
    fs::write(dir.path().join("huge.docx"), bytes).unwrap();

    let app = server(dir.path());

    let listing = app.get("/").await;
    listing.assert_status_ok();
    assert!(listing.text().contains(r#"href="/huge""#));

    let status = app.get("/huge").await.status_code();
    assert!(status == StatusCode::OK || status == StatusCode::INTERNAL_SERVER_ERROR);

    app.get("/report").await.assert_status_ok();
}
