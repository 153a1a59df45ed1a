//! HTML rendering module
//!
//! Renders the listing and detail pages plus error pages. All document text
//! is escaped with html-escape before it reaches the markup.

mod document;
mod layout;
mod listing;

pub use document::{render_block, render_document};
pub use listing::{document_href, render_listing, ListingEntry};

use html_escape::encode_text;

/// Error page for a failed request
pub fn render_error(status: u16, reason: &str, message: &str) -> String {
    let main = format!(
        r#"        <div class="bg-white p-6 rounded-lg shadow-md">
            <p class="text-gray-800">{}</p>
            <a href="/" class="text-blue-600 hover:underline mt-4 inline-block">Back to all documents</a>
        </div>"#,
        encode_text(message)
    );
    layout::page(&format!("{} {}", status, reason), None, &main)
}
