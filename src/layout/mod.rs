//! # Positioning Engine
//!
//! Turns a resolved [`LayoutNode`] tree into absolute placement
//! instructions. The engine is a pure function of (node, origin, ambient
//! direction): nodes carry no layout state, and the same tree always yields
//! the same placements.
//!
//! ## Direction handling
//!
//! There is no general bidi reordering pass. Every leaf has a pre-measured
//! width and a pre-resolved direction, and three rules are enough to
//! interleave LTR and RTL runs on one line:
//!
//! 1. An RTL text box is anchored by its right edge: its `x` is moved left
//!    by its own width, and its text is wrapped in a right-to-left isolate
//!    so the shaper treats it as an independent run.
//! 2. A horizontal list sweeps in its dominant direction. An RTL line starts
//!    at its right edge (origin + sum of child widths) and walks left.
//! 3. A child whose own direction differs from the line's ("foreign" run)
//!    is handed an anchor shifted by its width in the sweep direction, so
//!    rule 1 (or its absence) lands it in the right visual slot. The cursor
//!    still advances by the line's direction, not the child's.
//!
//! All inputs are pixels; every value is converted to points here, once.

use serde::Serialize;

use crate::font::FontSpec;
use crate::model::TextDirection;
use crate::tree::{Arrangement, LayoutNode, List, TextBox};
use crate::units::to_points;

/// U+2067 RIGHT-TO-LEFT ISOLATE.
pub const RLI: char = '\u{2067}';
/// U+2069 POP DIRECTIONAL ISOLATE.
pub const PDI: char = '\u{2069}';

/// A point on the page in points, origin top-left, y growing downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn shifted(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// "Draw this run here": the engine's unit of output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Top-left anchor of the run, in points.
    pub x: f64,
    pub y: f64,
    /// Text with directional isolate markers already applied.
    pub text: String,
    pub font: FontSpec,
    /// Resolved direction of the run.
    pub direction: TextDirection,
}

impl Placement {
    /// Text with isolate markers removed.
    pub fn plain_text(&self) -> &str {
        self.text
            .strip_prefix(RLI)
            .and_then(|t| t.strip_suffix(PDI))
            .unwrap_or(&self.text)
    }
}

/// Place every item of a page at the page origin, with an LTR ambient
/// direction.
pub fn place_page(items: &[LayoutNode]) -> Vec<Placement> {
    let mut out = Vec::new();
    for item in items {
        place(item, Point::ORIGIN, TextDirection::Ltr, &mut out);
    }
    out
}

/// Place `node` with its anchor at `origin`, appending placements to `out`.
///
/// `ambient` is the direction a node without its own `textDirection`
/// inherits.
pub fn place(node: &LayoutNode, origin: Point, ambient: TextDirection, out: &mut Vec<Placement>) {
    match node {
        LayoutNode::TextBox(text_box) => out.push(place_text_box(text_box, origin, ambient)),
        LayoutNode::List(list) => match list.arrangement {
            Arrangement::Vertical => place_vertical(list, origin, ambient, out),
            Arrangement::Horizontal { dominant } => place_horizontal(list, origin, dominant, out),
        },
    }
}

fn place_text_box(text_box: &TextBox, origin: Point, ambient: TextDirection) -> Placement {
    let direction = text_box.text_direction.unwrap_or(ambient);
    let mut x = origin.x + to_points(text_box.shift_x);
    let y = origin.y + to_points(text_box.shift_y);

    let text = match direction {
        TextDirection::Ltr => text_box.text.clone(),
        TextDirection::Rtl => {
            x -= to_points(text_box.width);
            let mut wrapped = String::with_capacity(text_box.text.len() + 6);
            wrapped.push(RLI);
            wrapped.push_str(&text_box.text);
            wrapped.push(PDI);
            wrapped
        }
    };

    Placement {
        x,
        y,
        text,
        font: FontSpec {
            family: text_box.font_family.clone(),
            size: to_points(text_box.font_size),
            weight: text_box.font_weight,
            style: text_box.font_style,
        },
        direction,
    }
}

fn place_vertical(list: &List, origin: Point, ambient: TextDirection, out: &mut Vec<Placement>) {
    let ambient = list.text_direction.unwrap_or(ambient);
    let mut cursor = origin.shifted(to_points(list.shift_x), to_points(list.shift_y));
    for child in &list.children {
        place(child, cursor, ambient, out);
        cursor.y += to_points(child.height());
    }
}

fn place_horizontal(list: &List, origin: Point, dominant: TextDirection, out: &mut Vec<Placement>) {
    let mut cursor = origin.shifted(to_points(list.shift_x), to_points(list.shift_y));
    if dominant == TextDirection::Rtl {
        let line_width: f64 = list.children.iter().map(LayoutNode::width).sum();
        cursor.x += to_points(line_width);
    }

    // +1 sweeps right, -1 sweeps left.
    let sweep = match dominant {
        TextDirection::Ltr => 1.0,
        TextDirection::Rtl => -1.0,
    };

    for child in &list.children {
        let width = to_points(child.width());
        let item_dir = child.text_direction().unwrap_or(dominant);
        let anchor = if item_dir == dominant {
            cursor
        } else {
            cursor.shifted(sweep * width, 0.0)
        };
        place(child, anchor, dominant, out);
        cursor.x += sweep * width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontStyle, FontWeight};

    fn text_box(text: &str, width: f64, height: f64, dir: Option<TextDirection>) -> LayoutNode {
        LayoutNode::TextBox(TextBox {
            text: text.to_string(),
            font_family: "Helvetica".to_string(),
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_direction: dir,
            shift_x: 0.0,
            shift_y: 0.0,
            width,
            height,
        })
    }

    fn list(arrangement: Arrangement, children: Vec<LayoutNode>) -> LayoutNode {
        LayoutNode::List(List {
            arrangement,
            text_direction: match arrangement {
                Arrangement::Horizontal { dominant } => Some(dominant),
                Arrangement::Vertical => None,
            },
            shift_x: 0.0,
            shift_y: 0.0,
            width: 0.0,
            height: 0.0,
            children,
        })
    }

    fn xs(placements: &[Placement]) -> Vec<f64> {
        placements.iter().map(|p| p.x).collect()
    }

    const LTR_LINE: Arrangement = Arrangement::Horizontal {
        dominant: TextDirection::Ltr,
    };
    const RTL_LINE: Arrangement = Arrangement::Horizontal {
        dominant: TextDirection::Rtl,
    };

    #[test]
    fn text_box_font_is_converted_to_points() {
        let out = place_page(&[text_box("a", 10.0, 10.0, None)]);
        assert_eq!(out[0].font.size, 12.0);
        assert_eq!(out[0].text, "a");
        assert_eq!(out[0].direction, TextDirection::Ltr);
    }

    #[test]
    fn text_box_shift_is_converted_once() {
        let mut node = text_box("a", 10.0, 10.0, None);
        if let LayoutNode::TextBox(t) = &mut node {
            t.shift_x = 8.0;
            t.shift_y = 4.0;
        }
        let mut out = Vec::new();
        place(&node, Point::new(100.0, 50.0), TextDirection::Ltr, &mut out);
        assert_eq!((out[0].x, out[0].y), (106.0, 53.0));
    }

    #[test]
    fn rtl_text_box_is_shifted_left_by_its_width() {
        let ltr = place_page(&[text_box("a", 40.0, 10.0, Some(TextDirection::Ltr))]);
        let rtl = place_page(&[text_box("a", 40.0, 10.0, Some(TextDirection::Rtl))]);
        assert_eq!(ltr[0].x - rtl[0].x, 30.0);
        assert_eq!(ltr[0].y, rtl[0].y);
    }

    #[test]
    fn rtl_text_is_isolated() {
        let out = place_page(&[text_box("שלום", 40.0, 10.0, Some(TextDirection::Rtl))]);
        assert_eq!(out[0].text, "\u{2067}שלום\u{2069}");
        assert_eq!(out[0].plain_text(), "שלום");
        assert_eq!(out[0].direction, TextDirection::Rtl);
    }

    #[test]
    fn ltr_line_advances_left_to_right() {
        // 40px = 30pt, 80px = 60pt
        let line = list(
            LTR_LINE,
            vec![text_box("a", 40.0, 10.0, None), text_box("b", 80.0, 10.0, None)],
        );
        let out = place_page(&[line]);
        assert_eq!(xs(&out), vec![0.0, 30.0]);
    }

    #[test]
    fn rtl_line_starts_at_right_edge() {
        let line = list(
            RTL_LINE,
            vec![text_box("a", 40.0, 10.0, None), text_box("b", 80.0, 10.0, None)],
        );
        let out = place_page(&[line]);
        // total 90pt: first box spans [60, 90], second [0, 60]
        assert_eq!(xs(&out), vec![60.0, 0.0]);
        assert!(out.iter().all(|p| p.direction == TextDirection::Rtl));
    }

    #[test]
    fn foreign_rtl_run_in_ltr_line() {
        let line = list(
            LTR_LINE,
            vec![
                text_box("a", 40.0, 10.0, None),
                text_box("b", 80.0, 10.0, Some(TextDirection::Rtl)),
                text_box("c", 40.0, 10.0, None),
            ],
        );
        let out = place_page(&[line]);
        // The RTL box gets anchor 30 + 60 and shifts back by its own 60.
        assert_eq!(xs(&out), vec![0.0, 30.0, 90.0]);
    }

    #[test]
    fn foreign_ltr_run_in_rtl_line() {
        let line = list(
            RTL_LINE,
            vec![
                text_box("a", 40.0, 10.0, None),
                text_box("b", 80.0, 10.0, Some(TextDirection::Ltr)),
                text_box("c", 40.0, 10.0, None),
            ],
        );
        let out = place_page(&[line]);
        // line is 120pt wide: a [90,120], b [30,90], c [0,30]
        assert_eq!(xs(&out), vec![90.0, 30.0, 0.0]);
    }

    #[test]
    fn foreign_sub_list_gets_compensated_anchor() {
        // A foreign-direction sub-list in an LTR line receives tmp.x + width.
        let inner = LayoutNode::List(List {
            arrangement: RTL_LINE,
            text_direction: Some(TextDirection::Rtl),
            shift_x: 0.0,
            shift_y: 0.0,
            width: 80.0,
            height: 10.0,
            children: vec![text_box("x", 80.0, 10.0, None)],
        });
        let line = list(LTR_LINE, vec![text_box("a", 40.0, 10.0, None), inner]);
        let out = place_page(&[line]);
        // inner list origin = 30 + 60 = 90, its RTL line starts at 90 + 60,
        // the box inside anchors at 150 and shifts left by 60.
        assert_eq!(xs(&out), vec![0.0, 90.0]);
    }

    #[test]
    fn vertical_list_accumulates_heights() {
        let column = list(
            Arrangement::Vertical,
            vec![
                text_box("a", 10.0, 20.0, None),
                text_box("b", 10.0, 40.0, None),
                text_box("c", 10.0, 20.0, None),
            ],
        );
        let ys: Vec<f64> = place_page(&[column]).iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 15.0, 45.0]);
    }

    #[test]
    fn zero_height_child_does_not_advance() {
        let column = list(
            Arrangement::Vertical,
            vec![
                text_box("a", 10.0, 20.0, None),
                text_box("b", 10.0, 0.0, None),
                text_box("c", 10.0, 20.0, None),
            ],
        );
        let ys: Vec<f64> = place_page(&[column]).iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 15.0, 15.0]);
    }

    #[test]
    fn vertical_list_passes_its_direction_down() {
        let mut column = list(
            Arrangement::Vertical,
            vec![text_box("a", 40.0, 20.0, None)],
        );
        if let LayoutNode::List(l) = &mut column {
            l.text_direction = Some(TextDirection::Rtl);
            l.shift_x = 400.0;
        }
        let out = place_page(&[column]);
        assert_eq!(out[0].x, 300.0 - 30.0);
        assert_eq!(out[0].direction, TextDirection::Rtl);
    }

    #[test]
    fn list_shift_moves_every_child() {
        let mut line = list(LTR_LINE, vec![text_box("a", 40.0, 10.0, None)]);
        if let LayoutNode::List(l) = &mut line {
            l.shift_x = 20.0;
            l.shift_y = 40.0;
        }
        let out = place_page(&[line]);
        assert_eq!((out[0].x, out[0].y), (15.0, 30.0));
    }

    #[test]
    fn placement_is_deterministic() {
        let line = list(
            RTL_LINE,
            vec![text_box("a", 40.0, 10.0, None), text_box("b", 80.0, 10.0, Some(TextDirection::Ltr))],
        );
        assert_eq!(place_page(&[line.clone()]), place_page(&[line]));
    }
}
