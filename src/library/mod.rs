//! Library module for document discovery
//!
//! Handles directory scanning and the mapping between ids and files.

mod document;
mod scanner;

pub use document::*;
pub use scanner::*;
