use std::path::Path;

use axum_test::TestServer;

use docshelf_server::config::Config;
use docshelf_server::routes;
use docshelf_server::state::AppState;

#[path = "../../src/docx/test_support.rs"]
#[allow(dead_code)]
mod fixture;

#[allow(unused_imports)]
pub use fixture::{inflate_declared_size, DocxFixture};

/// Test server over a document folder
pub fn server(documents_dir: &Path) -> TestServer {
    let mut config = Config::default();
    config.library.documents_dir = documents_dir.to_path_buf();
    TestServer::new(routes::router().with_state(AppState::new(config))).unwrap()
}

/// `report.docx` with one heading and one paragraph
#[allow(dead_code)]
pub fn write_report(dir: &Path) {
    DocxFixture::new()
        .heading(1, "Results")
        .paragraph("Findings here.")
        .write_to(&dir.join("report.docx"));
}
