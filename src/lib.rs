//! # folio
//!
//! A page-native layout engine for pre-measured, mixed-direction text.
//!
//! A document is a list of pages; each page holds nested horizontal and
//! vertical lists of text boxes whose sizes are already known. folio turns
//! that tree into absolute, direction-aware coordinates and paints them on a
//! [`Surface`](surface::Surface), by default a PDF.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]     : Document schema as it arrives (pixels, optional fields)
//!       ↓
//!   [tree]      : Validate, materialise defaults, report diagnostics
//!       ↓
//!   [layout]    : Bidi-aware placement, pixels → points
//!       ↓
//!   [paginate]  : Size, paint and commit one page at a time
//!       ↓
//!   [pdf]       : Serialize to PDF bytes (or any other Surface)
//! ```
//!
//! Defects in attributes (a list child without a height, a line without a
//! direction) never fail a render: they are reported to a
//! [`DiagnosticSink`](diagnostics::DiagnosticSink) and layout continues.

pub mod diagnostics;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod paginate;
pub mod pdf;
pub mod surface;
pub mod tree;
pub mod units;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::Serialize;

use diagnostics::{Diagnostic, DiagnosticSink};
use error::FolioError;
use model::Document;
use pdf::PdfSurface;
use surface::{PageRecord, RecordingSurface, Surface};

/// PDF bytes plus everything that was reported while laying them out.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub pdf: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Placements per page plus diagnostics, for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutDump {
    pub pages: Vec<PageRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lay out `document` onto any surface. Returns the number of pages
/// committed.
pub fn render_with<S: Surface + ?Sized>(
    document: &Document,
    surface: &mut S,
    sink: &mut dyn DiagnosticSink,
) -> Result<usize, FolioError> {
    let layout = tree::resolve(document, sink);
    paginate::paginate(&layout, surface)
}

/// Render a document to PDF bytes.
///
/// This is the primary entry point.
pub fn render(document: &Document, sink: &mut dyn DiagnosticSink) -> Result<Vec<u8>, FolioError> {
    let mut surface = PdfSurface::new().metadata(document.metadata.clone());
    render_with(document, &mut surface, sink)?;
    surface.finish()
}

/// Render a document described as JSON to PDF bytes, collecting diagnostics.
pub fn render_json(json: &str) -> Result<Rendered, FolioError> {
    let document = Document::from_json(json)?;
    let mut diagnostics = Vec::new();
    let pdf = render(&document, &mut diagnostics)?;
    Ok(Rendered { pdf, diagnostics })
}

/// Lay out a JSON document and return the placements instead of a PDF.
pub fn layout_json(json: &str) -> Result<LayoutDump, FolioError> {
    let document = Document::from_json(json)?;
    let mut diagnostics = Vec::new();
    let mut surface = RecordingSurface::new();
    render_with(&document, &mut surface, &mut diagnostics)?;
    Ok(LayoutDump {
        pages: surface.into_pages(),
        diagnostics,
    })
}
