//! Docshelf Server Library
//!
//! This crate exposes the pieces the server binary wires together, so that
//! integration tests can build the same router.
//!
//! # Modules
//!
//! - `library`: Document folder scanning and id resolution
//! - `docx`: DOCX parsing into ordered blocks
//! - `html`: Listing, detail and error pages
//! - `routes`: HTTP routes (pages and JSON API)

pub mod config;
pub mod docx;
pub mod error;
pub mod html;
pub mod library;
pub mod routes;
pub mod state;
