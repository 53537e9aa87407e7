//! # Diagnostics
//!
//! Non-fatal records of attribute-level defects found while resolving the
//! document. A diagnostic never stops rendering: the offending node falls
//! back to its default (or is skipped) and layout carries on.
//!
//! Diagnostics go to an injected [`DiagnosticSink`]. A `Vec<Diagnostic>`
//! collects them, [`LogSink`] forwards them to `log`, and [`NullSink`]
//! drops them.

use std::fmt;

use serde::Serialize;

/// What was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A child of a vertical list has no `height`; the cursor did not advance.
    MissingHeight,
    /// A child of a horizontal list (or an RTL box) has no `width`.
    MissingWidth,
    /// A list has no `direction`, or a horizontal list has no `textDirection`.
    MissingDirection,
}

/// One step in a [`NodePath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Page(usize),
    Item(usize),
    Child(usize),
}

/// Location of a node in the input document, e.g. `pages[0].items[2].list[1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<Segment>);

impl NodePath {
    pub fn page(index: usize) -> Self {
        NodePath(vec![Segment::Page(index)])
    }

    /// Path of the `index`-th item of this page.
    pub fn item(&self, index: usize) -> Self {
        self.push(Segment::Item(index))
    }

    /// Path of the `index`-th child of this list.
    pub fn child(&self, index: usize) -> Self {
        self.push(Segment::Child(index))
    }

    fn push(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        NodePath(segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Page(n) => write!(f, "pages[{n}]")?,
                Segment::Item(n) => write!(f, "items[{n}]")?,
                Segment::Child(n) => write!(f, "list[{n}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A recoverable layout defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: NodePath,
    /// Class of the offending node ("ItemList" or "TextBox").
    pub class: &'static str,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            DiagnosticKind::MissingHeight => "has no height; vertical advance skipped",
            DiagnosticKind::MissingWidth => "has no width; treated as zero-width",
            DiagnosticKind::MissingDirection => "has no direction; subtree skipped",
        };
        write!(f, "{} at {} {}", self.class, self.path, what)
    }
}

/// Receives diagnostics as they are found.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Drops every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `log::warn!` and keeps a count.
#[derive(Debug, Default)]
pub struct LogSink {
    pub count: usize,
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        log::warn!(target: "folio::layout", "{diagnostic}");
    }
}
