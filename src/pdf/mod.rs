//! # PDF Surface
//!
//! A [`Surface`] that writes a PDF 1.7 file. Pages are committed one at a
//! time: each committed page becomes a content stream sized by the
//! dimensions given to `begin_page`. The file itself is assembled by
//! [`PdfSurface::finish`].
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- Catalog
//! 2 0 obj ... endobj  <- Pages tree
//! ...                 <- fonts, then (content stream, page) per page, then Info
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Text uses the standard Type1 fonts with WinAnsiEncoding, so there is no
//! embedding and no shaping. RTL runs are put into visual order with
//! `unicode-bidi` before encoding; characters outside WinAnsi become `?`.
//! Nothing time-dependent is written, so identical input gives identical
//! bytes.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use log::debug;
use miniz_oxide::deflate::compress_to_vec_zlib;
use unicode_bidi::{BidiInfo, Level};

use crate::error::FolioError;
use crate::font::{Measure, StandardFont, StandardMetrics};
use crate::layout::Placement;
use crate::model::{Metadata, TextDirection};
use crate::surface::Surface;

/// Knobs for the PDF writer.
#[derive(Debug, Clone, Copy)]
pub struct PdfOptions {
    /// Deflate content streams. Turn off to read them in a text editor.
    pub compress: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self { compress: true }
    }
}

struct OpenPage {
    width: f64,
    height: f64,
    stream: String,
}

struct CommittedPage {
    width: f64,
    height: f64,
    content: Vec<u8>,
    compressed: bool,
}

pub struct PdfSurface<M: Measure = StandardMetrics> {
    measure: M,
    options: PdfOptions,
    metadata: Metadata,
    /// Fonts in first-use order; index `i` is resource `/Fi`.
    fonts: Vec<StandardFont>,
    pages: Vec<CommittedPage>,
    open: Option<OpenPage>,
}

impl PdfSurface<StandardMetrics> {
    pub fn new() -> Self {
        Self::with_measure(StandardMetrics)
    }
}

impl Default for PdfSurface<StandardMetrics> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Measure> PdfSurface<M> {
    pub fn with_measure(measure: M) -> Self {
        Self {
            measure,
            options: PdfOptions::default(),
            metadata: Metadata::default(),
            fonts: Vec::new(),
            pages: Vec::new(),
            open: None,
        }
    }

    pub fn options(mut self, options: PdfOptions) -> Self {
        self.options = options;
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Number of committed pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn font_index(&mut self, font: StandardFont) -> usize {
        if let Some(i) = self.fonts.iter().position(|f| *f == font) {
            return i;
        }
        self.fonts.push(font);
        self.fonts.len() - 1
    }

    /// Assemble the PDF file from the committed pages.
    pub fn finish(self) -> Result<Vec<u8>, FolioError> {
        if self.open.is_some() {
            return Err(FolioError::Render(
                "finish called while a page is still open".to_string(),
            ));
        }

        let mut objects: Vec<Vec<u8>> = Vec::new();
        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        objects.push(vec![]);
        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
        objects.push(vec![]);

        let mut fonts = self.fonts.clone();
        // Always have at least Helvetica
        if fonts.is_empty() {
            fonts.push(StandardFont::Helvetica);
        }
        let mut font_resources = String::new();
        for (i, font) in fonts.iter().enumerate() {
            let obj_id = objects.len();
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                )
                .into_bytes(),
            );
            if i > 0 {
                font_resources.push(' ');
            }
            let _ = write!(font_resources, "/F{} {} 0 R", i, obj_id);
        }

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in &self.pages {
            let content_obj_id = objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let filter = if page.compressed { " /Filter /FlateDecode" } else { "" };
            let _ = write!(
                content_data,
                "<< /Length {}{} >>\nstream\n",
                page.content.len(),
                filter
            );
            content_data.extend_from_slice(&page.content);
            content_data.extend_from_slice(b"\nendstream");
            objects.push(content_data);

            let page_obj_id = objects.len();
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                    page.width, page.height, content_obj_id, font_resources
                )
                .into_bytes(),
            );
            page_obj_ids.push(page_obj_id);
        }

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        objects[2] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = objects.len();
        objects.push(self.info_dict().into_bytes());

        Ok(serialize(&objects, info_obj_id))
    }

    fn info_dict(&self) -> String {
        let mut info = String::from("<< ");
        let entries = [
            ("Title", &self.metadata.title),
            ("Author", &self.metadata.author),
            ("Subject", &self.metadata.subject),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                let _ = write!(info, "/{} {} ", key, pdf_text_string(value));
            }
        }
        info.push_str("/Producer (folio) /Creator (folio) >>");
        info
    }
}

impl<M: Measure> Surface for PdfSurface<M> {
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), FolioError> {
        if self.open.is_some() {
            return Err(FolioError::Render(
                "begin_page called while a page is still open".to_string(),
            ));
        }
        self.open = Some(OpenPage {
            width,
            height,
            stream: String::new(),
        });
        Ok(())
    }

    fn paint(&mut self, placement: &Placement) -> Result<(), FolioError> {
        if self.open.is_none() {
            return Err(FolioError::Render("paint called with no open page".to_string()));
        }
        let font = StandardFont::resolve(&placement.font);
        let font_idx = self.font_index(font);
        let metrics = self.measure.measure(&placement.text, &placement.font);
        let page = self
            .open
            .as_mut()
            .ok_or_else(|| FolioError::Render("paint called with no open page".to_string()))?;

        // PDF's y axis grows upward from the bottom edge.
        let baseline_y = page.height - (placement.y + metrics.baseline);
        let visual = visual_order(&placement.text, placement.direction);

        let _ = write!(
            page.stream,
            "BT\n/F{} {:.2} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            font_idx,
            placement.font.size,
            placement.x,
            baseline_y,
            encode_win_ansi(&visual)
        );
        Ok(())
    }

    fn commit_page(&mut self) -> Result<(), FolioError> {
        let page = self
            .open
            .take()
            .ok_or_else(|| FolioError::Render("commit_page called with no open page".to_string()))?;
        let (content, compressed) = if self.options.compress {
            (compress_to_vec_zlib(page.stream.as_bytes(), 6), true)
        } else {
            (page.stream.into_bytes(), false)
        };
        debug!(
            target: "folio::pdf",
            "committed page {} ({:.2} x {:.2} pt, {} content bytes)",
            self.pages.len() + 1,
            page.width,
            page.height,
            content.len()
        );
        self.pages.push(CommittedPage {
            width: page.width,
            height: page.height,
            content,
            compressed,
        });
        Ok(())
    }
}

/// Put `text` into left-to-right display order and drop bidi control
/// characters, which have no glyph in the standard fonts.
fn visual_order(text: &str, direction: TextDirection) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    let para_level = match direction {
        TextDirection::Ltr => Level::ltr(),
        TextDirection::Rtl => Level::rtl(),
    };
    let bidi_info = BidiInfo::new(text, Some(para_level));
    let mut visual = String::with_capacity(text.len());
    for paragraph in &bidi_info.paragraphs {
        let line = paragraph.range.clone();
        visual.push_str(&bidi_info.reorder_line(paragraph, line));
    }
    visual.retain(|ch| !is_bidi_control(ch));
    visual
}

fn is_bidi_control(ch: char) -> bool {
    matches!(ch, '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}')
}

/// Encode text as a WinAnsi PDF string body: printable ASCII as-is with
/// `\`, `(`, `)` escaped, everything else as an octal escape.
fn encode_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => {
                let byte = win_ansi_byte(ch).unwrap_or(b'?');
                if byte.is_ascii() {
                    out.push(byte as char);
                } else {
                    let _ = write!(out, "\\{:03o}", byte);
                }
            }
        }
    }
    out
}

/// Windows-1252 byte for `ch`, if it has one. Latin-1 maps directly; the
/// 0x80..=0x9F block holds typographic punctuation and a few letters.
fn win_ansi_byte(ch: char) -> Option<u8> {
    match ch {
        '\u{00A0}'..='\u{00FF}' => Some(ch as u32 as u8),
        '\u{20AC}' => Some(0x80), // €
        '\u{201A}' => Some(0x82), // ‚
        '\u{0192}' => Some(0x83), // ƒ
        '\u{201E}' => Some(0x84), // „
        '\u{2026}' => Some(0x85), // …
        '\u{2020}' => Some(0x86), // †
        '\u{2021}' => Some(0x87), // ‡
        '\u{02C6}' => Some(0x88), // ˆ
        '\u{2030}' => Some(0x89), // ‰
        '\u{0160}' => Some(0x8A), // Š
        '\u{2039}' => Some(0x8B), // ‹
        '\u{0152}' => Some(0x8C), // Œ
        '\u{017D}' => Some(0x8E), // Ž
        '\u{2018}' => Some(0x91), // ‘
        '\u{2019}' => Some(0x92), // ’
        '\u{201C}' => Some(0x93), // “
        '\u{201D}' => Some(0x94), // ”
        '\u{2022}' => Some(0x95), // •
        '\u{2013}' => Some(0x96), // en dash
        '\u{2014}' => Some(0x97), // em dash
        '\u{02DC}' => Some(0x98), // ˜
        '\u{2122}' => Some(0x99), // ™
        '\u{0161}' => Some(0x9A), // š
        '\u{203A}' => Some(0x9B), // ›
        '\u{0153}' => Some(0x9C), // œ
        '\u{017E}' => Some(0x9E), // ž
        '\u{0178}' => Some(0x9F), // Ÿ
        _ => None,
    }
}

/// Escape special characters in a PDF literal string.
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// A PDF text string: a literal for ASCII, otherwise UTF-16BE with a byte
/// order mark as a hex string.
fn pdf_text_string(s: &str) -> String {
    if s.is_ascii() {
        return format!("({})", escape_pdf_string(s));
    }
    let mut hex = String::from("<FEFF");
    for unit in s.encode_utf16() {
        let _ = write!(hex, "{:04X}", unit);
    }
    hex.push('>');
    hex
}

/// Serialize all objects into the final PDF byte stream.
fn serialize(objects: &[Vec<u8>], info_obj_id: usize) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; objects.len()];

    // Header
    output.extend_from_slice(b"%PDF-1.7\n");
    output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    for (i, obj) in objects.iter().enumerate().skip(1) {
        offsets[i] = output.len();
        let _ = write!(output, "{} 0 obj\n", i);
        output.extend_from_slice(obj);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    let _ = write!(output, "xref\n0 {}\n", objects.len());
    let _ = write!(output, "0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        let _ = write!(output, "{:010} 00000 n \n", offset);
    }

    let _ = write!(
        output,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len(),
        info_obj_id,
        xref_offset
    );

    output
}
