//! Document listing page

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use super::layout::page;
use crate::docx::DocumentSummary;
use crate::library::DocumentRef;

/// One card on the listing page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    #[serde(flatten)]
    pub document: DocumentRef,
    pub description: Option<String>,
}

impl ListingEntry {
    /// Entry with the document's own title and description when it parsed
    pub fn new(mut document: DocumentRef, summary: Option<DocumentSummary>) -> Self {
        let summary = summary.unwrap_or_default();
        if let Some(title) = summary.title {
            document.title = title;
        }
        Self {
            document,
            description: summary.description,
        }
    }

    /// Link to the detail page
    pub fn href(&self) -> String {
        document_href(&self.document.id)
    }
}

/// URL path of a document's detail page
pub fn document_href(id: &str) -> String {
    format!("/{}", urlencoding::encode(id))
}

/// Render the listing page
pub fn render_listing(entries: &[ListingEntry]) -> String {
    let mut main = String::new();

    if entries.is_empty() {
        main.push_str(
            r#"        <p class="text-gray-600">No documents yet. Add <code>.docx</code> files to the document folder and reload.</p>"#,
        );
    } else {
        main.push_str(
            r#"        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">"#,
        );
        main.push('\n');
        for entry in entries {
            main.push_str(&render_card(entry));
        }
        main.push_str("        </div>");
    }

    page(
        "Documents",
        Some(&format!("{} document(s) available", entries.len())),
        &main,
    )
}

fn render_card(entry: &ListingEntry) -> String {
    let description = entry
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="text-gray-600 mb-4">{}</p>"#, encode_text(d)))
        .unwrap_or_default();

    format!(
        r#"            <div class="bg-white p-6 rounded-lg shadow-md">
                <h2 class="text-xl font-semibold mb-2">{title}</h2>
                {description}
                <a href="{href}" class="text-blue-600 hover:underline">Read more</a>
                <p class="text-gray-400 text-sm mt-2">{file_name}</p>
            </div>
"#,
        title = encode_text(&entry.document.title),
        description = description,
        href = encode_double_quoted_attribute(&entry.href()),
        file_name = encode_text(&entry.document.file_name),
    )
}
