//! Document detail page

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::layout::page;
use crate::docx::{Block, ImageData, ParsedDocument, TextRun};
use crate::library::DocumentRef;

/// Render a parsed document, blocks in source order
pub fn render_document(document: &DocumentRef, parsed: &ParsedDocument) -> String {
    let summary = parsed.summary();
    let title = summary.title.as_deref().unwrap_or(&document.title);

    let mut main = String::from(
        r#"        <div class="bg-white p-6 rounded-lg shadow-md">
            <article class="prose max-w-none">
"#,
    );

    if parsed.is_empty() {
        main.push_str(r#"                <p class="text-gray-600">This document has no readable content.</p>"#);
        main.push('\n');
    }
    for block in &parsed.blocks {
        main.push_str("                ");
        main.push_str(&render_block(block));
        main.push('\n');
    }

    main.push_str(
        r#"            </article>
            <a href="/" class="text-blue-600 hover:underline mt-4 inline-block">Back to all documents</a>
        </div>"#,
    );

    page(title, Some(&document.file_name), &main)
}

/// Markup for a single block
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            let tag = heading_tag(*level);
            format!(
                r#"<{tag} class="font-bold mt-6 mb-2">{}</{tag}>"#,
                encode_text(text),
                tag = tag
            )
        }
        Block::Paragraph { runs } => format!(r#"<p class="my-2">{}</p>"#, render_runs(runs)),
        Block::Image(image) => render_image(image),
    }
}

/// `h1`..`h6`; deeper outline levels share `h6`
fn heading_tag(level: u8) -> String {
    format!("h{}", level.clamp(1, 6))
}

fn render_runs(runs: &[TextRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let mut text = encode_text(&run.text).replace('\n', "<br>");
        if run.italic {
            text = format!("<em>{}</em>", text);
        }
        if run.bold {
            text = format!("<strong>{}</strong>", text);
        }
        out.push_str(&text);
    }
    out
}

fn render_image(image: &ImageData) -> String {
    let alt = image
        .name
        .rsplit('/')
        .next()
        .unwrap_or(image.name.as_str());

    format!(
        r#"<img src="{}" alt="{}" class="my-4 max-w-full h-auto">"#,
        encode_double_quoted_attribute(&image.data_uri()),
        encode_double_quoted_attribute(alt)
    )
}
