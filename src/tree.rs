//! # Layout Node Model
//!
//! The validated tree the positioning engine walks. Every optional attribute
//! of the input has been replaced by a concrete value, so the engine never
//! asks "is this present?". Geometry is still in pixels.
//!
//! [`resolve`] builds this tree from a parsed [`Document`] and is the only
//! place that reports missing attributes.

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, NodePath};
use crate::model::{self, Document, FontStyle, FontWeight, ListDirection, Metadata, TextDirection};

/// A resolved document: pages with concrete sizes and validated items.
#[derive(Debug, Clone)]
pub struct Layout {
    pub pages: Vec<PageLayout>,
    pub metadata: Metadata,
}

/// A page with its size in pixels.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub items: Vec<LayoutNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    List(List),
    TextBox(TextBox),
}

/// How a list arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Top to bottom, advancing by each child's height.
    Vertical,
    /// Along a line swept in the `dominant` direction, advancing by width.
    Horizontal { dominant: TextDirection },
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub arrangement: Arrangement,
    pub text_direction: Option<TextDirection>,
    pub shift_x: f64,
    pub shift_y: f64,
    pub width: f64,
    pub height: f64,
    pub children: Vec<LayoutNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    /// `None` inherits the ambient direction.
    pub text_direction: Option<TextDirection>,
    pub shift_x: f64,
    pub shift_y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutNode {
    pub fn width(&self) -> f64 {
        match self {
            LayoutNode::List(l) => l.width,
            LayoutNode::TextBox(t) => t.width,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            LayoutNode::List(l) => l.height,
            LayoutNode::TextBox(t) => t.height,
        }
    }

    pub fn text_direction(&self) -> Option<TextDirection> {
        match self {
            LayoutNode::List(l) => l.text_direction,
            LayoutNode::TextBox(t) => t.text_direction,
        }
    }
}

/// Which extent the parent consumes when advancing past a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Page items all sit at the page origin.
    Page,
    Vertical,
    Horizontal,
}

/// Validate `document` and materialise every default.
///
/// Missing attributes are reported to `sink` with the path of the node that
/// lacks them. Lists that cannot be arranged at all (no `direction`, or a
/// horizontal list with no `textDirection`) are dropped together with their
/// subtree; their siblings are unaffected.
pub fn resolve(document: &Document, sink: &mut dyn DiagnosticSink) -> Layout {
    let pages = document
        .pages
        .iter()
        .enumerate()
        .map(|(page_idx, page)| {
            let path = NodePath::page(page_idx);
            let items = page
                .items
                .iter()
                .enumerate()
                .filter_map(|(i, node)| {
                    let resolver = Resolver {
                        path: path.item(i),
                        slot: Slot::Page,
                        ambient: TextDirection::Ltr,
                    };
                    resolver.node(node, sink)
                })
                .collect();
            PageLayout {
                width: page.width.unwrap_or(document.width),
                height: page.height.unwrap_or(document.height),
                items,
            }
        })
        .collect();

    Layout {
        pages,
        metadata: document.metadata.clone(),
    }
}

struct Resolver {
    path: NodePath,
    slot: Slot,
    ambient: TextDirection,
}

impl Resolver {
    fn report(&self, sink: &mut dyn DiagnosticSink, kind: DiagnosticKind, node: &model::Node) {
        sink.report(Diagnostic {
            kind,
            path: self.path.clone(),
            class: node.class(),
        });
    }

    fn node(&self, node: &model::Node, sink: &mut dyn DiagnosticSink) -> Option<LayoutNode> {
        let mut width_reported = false;
        match self.slot {
            Slot::Vertical if node.height().is_none() => {
                self.report(sink, DiagnosticKind::MissingHeight, node);
            }
            Slot::Horizontal if node.width().is_none() => {
                self.report(sink, DiagnosticKind::MissingWidth, node);
                width_reported = true;
            }
            _ => {}
        }

        match node {
            model::Node::ItemList(list) => self.list(node, list, sink),
            model::Node::TextBox(text_box) => {
                let direction = text_box.text_direction.unwrap_or(self.ambient);
                if direction == TextDirection::Rtl && text_box.width.is_none() && !width_reported {
                    self.report(sink, DiagnosticKind::MissingWidth, node);
                }
                Some(LayoutNode::TextBox(TextBox {
                    text: text_box.text.clone(),
                    font_family: text_box.font_family.clone(),
                    font_size: text_box.font_size,
                    font_weight: text_box.font_weight.unwrap_or_default(),
                    font_style: text_box.font_style.unwrap_or_default(),
                    text_direction: text_box.text_direction,
                    shift_x: text_box.shift_x.unwrap_or(0.0),
                    shift_y: text_box.shift_y.unwrap_or(0.0),
                    width: text_box.width.unwrap_or(0.0),
                    height: text_box.height.unwrap_or(0.0),
                }))
            }
        }
    }

    fn list(
        &self,
        node: &model::Node,
        list: &model::ItemList,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<LayoutNode> {
        let (arrangement, slot, ambient) = match (list.direction, list.text_direction) {
            (None, _) | (Some(ListDirection::Horizontal), None) => {
                self.report(sink, DiagnosticKind::MissingDirection, node);
                return None;
            }
            (Some(ListDirection::Vertical), own) => (
                Arrangement::Vertical,
                Slot::Vertical,
                own.unwrap_or(self.ambient),
            ),
            (Some(ListDirection::Horizontal), Some(dominant)) => (
                Arrangement::Horizontal { dominant },
                Slot::Horizontal,
                dominant,
            ),
        };

        let children = list
            .list
            .iter()
            .enumerate()
            .filter_map(|(i, child)| {
                let resolver = Resolver {
                    path: self.path.child(i),
                    slot,
                    ambient,
                };
                resolver.node(child, sink)
            })
            .collect();

        Some(LayoutNode::List(List {
            arrangement,
            text_direction: list.text_direction,
            shift_x: list.shift_x.unwrap_or(0.0),
            shift_y: list.shift_y.unwrap_or(0.0),
            width: list.width.unwrap_or(0.0),
            height: list.height.unwrap_or(0.0),
            children,
        }))
    }
}
