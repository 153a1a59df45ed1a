//! In-memory DOCX packages for tests
//!
//! Only depends on external crates so integration tests can include it too.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Default Extension="png" ContentType="image/png"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Builder for a minimal WordprocessingML package
#[derive(Debug, Default)]
pub struct DocxFixture {
    body: String,
    relationships: Vec<(String, String)>,
    media: Vec<(String, Vec<u8>)>,
    styles: Option<String>,
    without_body: bool,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, level: u8, text: &str) -> Self {
        self.body.push_str(&format!(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading{}"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            level,
            escape(text)
        ));
        self
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.body.push_str(&format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape(text)
        ));
        self
    }

    /// Append raw body XML
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// Append a paragraph holding one inline picture stored as `word/media/<name>`
    pub fn image(mut self, name: &str, data: &[u8]) -> Self {
        let rel_id = format!("rIdImg{}", self.relationships.len() + 1);
        self.body.push_str(&format!(
            r#"<w:p><w:r><w:drawing><wp:inline><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
            rel_id
        ));
        self.relationships.push((rel_id, format!("media/{}", name)));
        self.media.push((format!("word/media/{}", name), data.to_vec()));
        self
    }

    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(xml.to_string());
        self
    }

    /// Leave out `word/document.xml`
    pub fn without_body(mut self) -> Self {
        self.without_body = true;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        add(&mut zip, "[Content_Types].xml", CONTENT_TYPES.as_bytes());

        if !self.without_body {
            let document = format!(
                concat!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
                    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
                    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
                    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
                    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                    "<w:body>{}</w:body></w:document>"
                ),
                self.body
            );
            add(&mut zip, "word/document.xml", document.as_bytes());
        }

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, target) in &self.relationships {
            rels.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id, IMAGE_REL_TYPE, target
            ));
        }
        rels.push_str("</Relationships>");
        add(&mut zip, "word/_rels/document.xml.rels", rels.as_bytes());

        if let Some(styles) = &self.styles {
            add(&mut zip, "word/styles.xml", styles.as_bytes());
        }

        for (name, data) in &self.media {
            add(&mut zip, name, data);
        }

        zip.finish().expect("finish fixture archive").into_inner()
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).expect("write fixture");
    }
}

/// Overwrite the uncompressed size the central directory declares for `entry`
pub fn inflate_declared_size(package: &mut [u8], entry: &str, size: u32) {
    const CENTRAL_HEADER: [u8; 4] = [b'P', b'K', 0x01, 0x02];

    for i in 0..package.len().saturating_sub(46) {
        if package[i..i + 4] != CENTRAL_HEADER {
            continue;
        }
        let name_len = u16::from_le_bytes([package[i + 28], package[i + 29]]) as usize;
        if package.get(i + 46..i + 46 + name_len) == Some(entry.as_bytes()) {
            package[i + 24..i + 28].copy_from_slice(&size.to_le_bytes());
            return;
        }
    }
    panic!("no central directory entry for {}", entry);
}

fn add(zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, data: &[u8]) {
    zip.start_file(name, SimpleFileOptions::default()).expect("start fixture entry");
    zip.write_all(data).expect("write fixture entry");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
