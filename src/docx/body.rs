//! Event-driven reader for `word/document.xml`
//!
//! Walks the WordprocessingML body once, in document order, and turns
//! paragraphs into [`Block`]s. Images are emitted where their drawing sits in
//! the text flow. Elements are matched by namespace, not prefix, so files that
//! bind WordprocessingML to something other than `w:` still parse.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::error::{ParseErrorKind, ParseResult};
use super::styles::StyleSheet;
use super::types::{Block, ImageData, TextRun};

/// Part name of the main document body
pub const DOCUMENT_PART: &str = "word/document.xml";

const NS_WORDML: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_WORDML_STRICT: &[u8] = b"http://purl.oclc.org/ooxml/wordprocessingml/main";
const NS_DRAWINGML: &[u8] = b"http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_DRAWINGML_STRICT: &[u8] = b"http://purl.oclc.org/ooxml/drawingml/main";
const NS_VML: &[u8] = b"urn:schemas-microsoft-com:vml";
const NS_MARKUP_COMPAT: &[u8] = b"http://schemas.openxmlformats.org/markup-compatibility/2006";

/// Paragraphs longer than this never count as "Chapter ..." headings
const CHAPTER_HEADING_MAX_CHARS: usize = 120;

/// Level assigned to headings recognised without an explicit number
const DEFAULT_HEADING_LEVEL: u8 = 2;

/// Elements the walker reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Paragraph,
    ParagraphStyle,
    OutlineLevel,
    Run,
    Bold,
    Italic,
    Text,
    Tab,
    Break,
    Blip,
    VmlImage,
    /// Subtrees whose content must not reach the output
    Skipped,
    Other,
}

fn classify(ns: &[u8], local: &[u8]) -> Tag {
    if ns == NS_WORDML || ns == NS_WORDML_STRICT {
        match local {
            b"p" => Tag::Paragraph,
            b"pStyle" => Tag::ParagraphStyle,
            b"outlineLvl" => Tag::OutlineLevel,
            b"r" => Tag::Run,
            b"b" => Tag::Bold,
            b"i" => Tag::Italic,
            b"t" => Tag::Text,
            b"tab" => Tag::Tab,
            b"br" | b"cr" => Tag::Break,
            b"rPrChange" | b"pPrChange" => Tag::Skipped,
            _ => Tag::Other,
        }
    } else if ns == NS_DRAWINGML || ns == NS_DRAWINGML_STRICT {
        match local {
            b"blip" => Tag::Blip,
            _ => Tag::Other,
        }
    } else if ns == NS_VML && local == b"imagedata" {
        Tag::VmlImage
    } else if ns == NS_MARKUP_COMPAT && local == b"Fallback" {
        Tag::Skipped
    } else {
        Tag::Other
    }
}

/// Read all blocks from a document body.
///
/// `load_image` resolves a relationship id to image bytes; ids it cannot
/// resolve are dropped.
pub fn read_body<F>(xml: &str, styles: &StyleSheet, mut load_image: F) -> ParseResult<Vec<Block>>
where
    F: FnMut(&str) -> Option<ImageData>,
{
    let mut reader = NsReader::from_str(xml);
    let mut walker = BodyWalker::new(styles);

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| ParseErrorKind::xml(DOCUMENT_PART, e))?;
        let ns: &[u8] = match ns {
            ResolveResult::Bound(Namespace(ns)) => ns,
            _ => b"",
        };

        match event {
            Event::Start(e) => {
                let tag = classify(ns, e.local_name().as_ref());
                walker.start(tag, &e, false, &mut load_image);
            }
            Event::Empty(e) => {
                let tag = classify(ns, e.local_name().as_ref());
                walker.start(tag, &e, true, &mut load_image);
            }
            Event::End(e) => {
                let tag = classify(ns, e.local_name().as_ref());
                walker.end(tag);
            }
            Event::Text(e) if walker.wants_text() => {
                let text = e
                    .unescape()
                    .map_err(|err| ParseErrorKind::xml(DOCUMENT_PART, err))?;
                walker.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(walker.blocks)
}

/// A piece of paragraph content in source order
#[derive(Debug)]
enum Piece {
    Text(TextRun),
    Image(ImageData),
}

#[derive(Debug, Default)]
struct RunState {
    bold: bool,
    italic: bool,
    in_text: bool,
    text: String,
}

impl RunState {
    fn take_text(&mut self) -> Option<TextRun> {
        if self.text.is_empty() {
            return None;
        }
        Some(TextRun {
            text: std::mem::take(&mut self.text),
            bold: self.bold,
            italic: self.italic,
        })
    }
}

#[derive(Debug, Default)]
struct ParagraphBuilder {
    style: Option<String>,
    outline_level: Option<u8>,
    pieces: Vec<Piece>,
    run: Option<RunState>,
}

impl ParagraphBuilder {
    fn push_text(&mut self, run: TextRun) {
        if let Some(Piece::Text(last)) = self.pieces.last_mut() {
            if last.same_format(&run) {
                last.text.push_str(&run.text);
                return;
            }
        }
        self.pieces.push(Piece::Text(run));
    }

    fn flush_run_text(&mut self) {
        if let Some(run) = self.run.as_mut().and_then(RunState::take_text) {
            self.push_text(run);
        }
    }

    fn plain_text(&self) -> String {
        self.pieces
            .iter()
            .filter_map(|p| match p {
                Piece::Text(run) => Some(run.text.as_str()),
                Piece::Image(_) => None,
            })
            .collect()
    }
}

struct BodyWalker<'a> {
    styles: &'a StyleSheet,
    /// Open paragraphs; text boxes nest paragraphs inside runs
    paragraphs: Vec<ParagraphBuilder>,
    skip_depth: usize,
    blocks: Vec<Block>,
}

impl<'a> BodyWalker<'a> {
    fn new(styles: &'a StyleSheet) -> Self {
        Self {
            styles,
            paragraphs: Vec::new(),
            skip_depth: 0,
            blocks: Vec::new(),
        }
    }

    fn wants_text(&self) -> bool {
        self.skip_depth == 0
            && self
                .paragraphs
                .last()
                .and_then(|p| p.run.as_ref())
                .is_some_and(|r| r.in_text)
    }

    fn text(&mut self, text: &str) {
        if let Some(run) = self.paragraphs.last_mut().and_then(|p| p.run.as_mut()) {
            run.text.push_str(text);
        }
    }

    fn start<F>(&mut self, tag: Tag, e: &BytesStart<'_>, empty: bool, load_image: &mut F)
    where
        F: FnMut(&str) -> Option<ImageData>,
    {
        if self.skip_depth > 0 {
            if tag == Tag::Skipped && !empty {
                self.skip_depth += 1;
            }
            return;
        }

        match tag {
            Tag::Skipped if !empty => self.skip_depth = 1,
            Tag::Paragraph if !empty => {
                self.flush_enclosing();
                self.paragraphs.push(ParagraphBuilder::default());
            }
            Tag::ParagraphStyle => {
                if let Some(p) = self.paragraphs.last_mut() {
                    p.style = attr_value(e, b"val");
                }
            }
            Tag::OutlineLevel => {
                if let Some(p) = self.paragraphs.last_mut() {
                    p.outline_level = attr_value(e, b"val").and_then(|v| v.parse().ok());
                }
            }
            Tag::Run if !empty => {
                if let Some(p) = self.paragraphs.last_mut() {
                    p.run = Some(RunState::default());
                }
            }
            Tag::Bold | Tag::Italic => {
                if let Some(run) = self.current_run() {
                    let on = toggle_value(e);
                    if tag == Tag::Bold {
                        run.bold = on;
                    } else {
                        run.italic = on;
                    }
                }
            }
            Tag::Text if !empty => {
                if let Some(run) = self.current_run() {
                    run.in_text = true;
                }
            }
            Tag::Tab => self.text_if_in_run("\t"),
            Tag::Break => self.text_if_in_run("\n"),
            Tag::Blip | Tag::VmlImage => {
                let key: &[u8] = if tag == Tag::Blip { b"embed" } else { b"id" };
                let image = attr_value(e, key).and_then(|id| load_image(&id));
                if let (Some(image), Some(p)) = (image, self.paragraphs.last_mut()) {
                    p.flush_run_text();
                    p.pieces.push(Piece::Image(image));
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag) {
        if self.skip_depth > 0 {
            if tag == Tag::Skipped {
                self.skip_depth -= 1;
            }
            return;
        }

        match tag {
            Tag::Text => {
                if let Some(run) = self.current_run() {
                    run.in_text = false;
                }
            }
            Tag::Run => {
                if let Some(p) = self.paragraphs.last_mut() {
                    p.flush_run_text();
                    p.run = None;
                }
            }
            Tag::Paragraph => {
                if let Some(p) = self.paragraphs.pop() {
                    self.finish_paragraph(p);
                }
            }
            _ => {}
        }
    }

    fn current_run(&mut self) -> Option<&mut RunState> {
        self.paragraphs.last_mut().and_then(|p| p.run.as_mut())
    }

    fn text_if_in_run(&mut self, text: &str) {
        if let Some(run) = self.current_run() {
            run.text.push_str(text);
        }
    }

    /// Emit what the enclosing paragraph holds so far; a nested paragraph
    /// (text box content) then lands after it and the rest follows later.
    fn flush_enclosing(&mut self) {
        let Some(outer) = self.paragraphs.last_mut() else {
            return;
        };
        outer.flush_run_text();
        if outer.pieces.is_empty() {
            return;
        }
        let head = ParagraphBuilder {
            style: outer.style.clone(),
            outline_level: outer.outline_level,
            pieces: std::mem::take(&mut outer.pieces),
            run: None,
        };
        self.finish_paragraph(head);
    }

    fn finish_paragraph(&mut self, mut p: ParagraphBuilder) {
        p.flush_run_text();
        let plain = p.plain_text();

        if let Some(level) = self.heading_level(&p, &plain) {
            let mut heading = Some(Block::heading(level, plain.trim()));
            for piece in p.pieces {
                match piece {
                    Piece::Text(_) => {
                        if let Some(block) = heading.take().filter(|b| !b.text().is_empty()) {
                            self.blocks.push(block);
                        }
                    }
                    Piece::Image(image) => self.blocks.push(Block::Image(image)),
                }
            }
            return;
        }

        let mut runs: Vec<TextRun> = Vec::new();
        for piece in p.pieces {
            match piece {
                Piece::Text(run) => runs.push(run),
                Piece::Image(image) => {
                    self.push_paragraph(std::mem::take(&mut runs));
                    self.blocks.push(Block::Image(image));
                }
            }
        }
        self.push_paragraph(runs);
    }

    fn push_paragraph(&mut self, runs: Vec<TextRun>) {
        if runs.iter().any(|r| !r.text.trim().is_empty()) {
            self.blocks.push(Block::Paragraph { runs });
        }
    }

    fn heading_level(&self, p: &ParagraphBuilder, text: &str) -> Option<u8> {
        if let Some(level) = p
            .style
            .as_deref()
            .and_then(|id| level_from_style_name(self.styles.name(id)))
        {
            return Some(level);
        }

        let outline = p
            .outline_level
            .or_else(|| p.style.as_deref().and_then(|id| self.styles.outline_level(id)));
        if let Some(level) = outline.filter(|l| *l <= 8) {
            return Some(level + 1);
        }

        let trimmed = text.trim();
        if trimmed.chars().count() <= CHAPTER_HEADING_MAX_CHARS
            && trimmed.to_lowercase().starts_with("chapter")
        {
            return Some(DEFAULT_HEADING_LEVEL);
        }

        None
    }
}

/// Heading level implied by a style name such as `heading 2` or `Title`
fn level_from_style_name(name: &str) -> Option<u8> {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if normalized == "title" {
        return Some(1);
    }
    if let Some(level) = normalized
        .strip_prefix("heading")
        .and_then(|rest| rest.parse::<u8>().ok())
        .filter(|l| (1..=9).contains(l))
    {
        return Some(level);
    }
    normalized
        .contains("heading")
        .then_some(DEFAULT_HEADING_LEVEL)
}

/// Value of the first attribute with the given local name
fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// On/off property: present means on unless `val` says otherwise
fn toggle_value(e: &BytesStart<'_>) -> bool {
    !matches!(
        attr_value(e, b"val").as_deref(),
        Some("0" | "false" | "off" | "none")
    )
}
