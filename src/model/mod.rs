//! # Document Model
//!
//! The input representation, exactly as it arrives on the wire. A document
//! is a list of pages; each page holds a list of items; items are nested
//! `ItemList`s and leaf `TextBox`es. All geometry is in pixels.
//!
//! Optional attributes stay optional here. Turning them into concrete
//! values (and reporting the ones that should have been present) is the
//! job of [`crate::tree::resolve`].

use serde::{Deserialize, Serialize};

/// A complete document ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Default page width in pixels.
    pub width: f64,
    /// Default page height in pixels.
    pub height: f64,
    /// Pages in output order.
    pub pages: Vec<Page>,
    /// Document metadata (title, author, subject).
    #[serde(default)]
    pub metadata: Metadata,
}

/// Document metadata embedded in the PDF info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

/// One output page. Dimensions override the document defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub items: Vec<Node>,
}

/// A node in the layout tree, tagged by its `class`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum Node {
    ItemList(ItemList),
    TextBox(TextBox),
}

/// A container that stacks its children along one axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    /// Stacking axis. Absence is reported, not rejected.
    #[serde(default)]
    pub direction: Option<ListDirection>,
    /// Dominant direction; required for horizontal lists.
    #[serde(default)]
    pub text_direction: Option<TextDirection>,
    #[serde(default)]
    pub shift_x: Option<f64>,
    #[serde(default)]
    pub shift_y: Option<f64>,
    /// Declared extent, used when this list is itself a child of a list.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub list: Vec<Node>,
}

/// A pre-measured run of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    pub text: String,
    pub font_family: String,
    #[serde(deserialize_with = "positive_f64")]
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: Option<FontWeight>,
    #[serde(default)]
    pub font_style: Option<FontStyle>,
    #[serde(default)]
    pub text_direction: Option<TextDirection>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub shift_x: Option<f64>,
    #[serde(default)]
    pub shift_y: Option<f64>,
}

/// Stacking axis of an `ItemList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListDirection {
    Horizontal,
    Vertical,
}

/// Inline direction of a run or a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

fn positive_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if v > 0.0 && v.is_finite() {
        Ok(v)
    } else {
        Err(serde::de::Error::custom(format!(
            "fontSize must be a positive number, got {v}"
        )))
    }
}

impl Document {
    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Node {
    /// Create a TextBox with the given text, font and box size (pixels).
    pub fn text(text: &str, font_family: &str, font_size: f64, width: f64, height: f64) -> Self {
        Node::TextBox(TextBox {
            text: text.to_string(),
            font_family: font_family.to_string(),
            font_size,
            font_weight: None,
            font_style: None,
            text_direction: None,
            width: Some(width),
            height: Some(height),
            shift_x: None,
            shift_y: None,
        })
    }

    /// Create an ItemList stacking `children` along `direction`.
    pub fn list(
        direction: ListDirection,
        text_direction: Option<TextDirection>,
        children: Vec<Node>,
    ) -> Self {
        Node::ItemList(ItemList {
            direction: Some(direction),
            text_direction,
            list: children,
            ..Default::default()
        })
    }

    /// Override this node's own text direction.
    pub fn with_direction(mut self, dir: TextDirection) -> Self {
        match &mut self {
            Node::ItemList(l) => l.text_direction = Some(dir),
            Node::TextBox(t) => t.text_direction = Some(dir),
        }
        self
    }

    /// Set this node's shift (pixels).
    pub fn with_shift(mut self, x: f64, y: f64) -> Self {
        match &mut self {
            Node::ItemList(l) => {
                l.shift_x = Some(x);
                l.shift_y = Some(y);
            }
            Node::TextBox(t) => {
                t.shift_x = Some(x);
                t.shift_y = Some(y);
            }
        }
        self
    }

    /// Node class name as it appears in JSON.
    pub fn class(&self) -> &'static str {
        match self {
            Node::ItemList(_) => "ItemList",
            Node::TextBox(_) => "TextBox",
        }
    }

    /// Declared width in pixels, if any.
    pub fn width(&self) -> Option<f64> {
        match self {
            Node::ItemList(l) => l.width,
            Node::TextBox(t) => t.width,
        }
    }

    /// Declared height in pixels, if any.
    pub fn height(&self) -> Option<f64> {
        match self {
            Node::ItemList(l) => l.height,
            Node::TextBox(t) => t.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_lists() {
        let json = r#"{
            "width": 800, "height": 600,
            "pages": [{ "items": [{
                "class": "ItemList", "direction": "Horizontal", "textDirection": "rtl",
                "list": [
                    { "class": "TextBox", "text": "שלום", "fontFamily": "FreeSerif",
                      "fontSize": 16, "width": 40, "height": 20 },
                    { "class": "TextBox", "text": "hello", "fontFamily": "FreeSerif",
                      "fontSize": 16, "fontWeight": "bold", "textDirection": "ltr", "width": 35 }
                ]
            }]}]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].width.is_none());
        let Node::ItemList(list) = &doc.pages[0].items[0] else {
            panic!("expected ItemList");
        };
        assert_eq!(list.direction, Some(ListDirection::Horizontal));
        assert_eq!(list.text_direction, Some(TextDirection::Rtl));
        let Node::TextBox(second) = &list.list[1] else {
            panic!("expected TextBox");
        };
        assert_eq!(second.font_weight, Some(FontWeight::Bold));
        assert_eq!(second.height, None);
    }

    #[test]
    fn missing_direction_is_not_a_parse_error() {
        let json = r#"{ "width": 10, "height": 10, "pages": [{ "items": [
            { "class": "ItemList", "list": [] } ] }] }"#;
        let doc = Document::from_json(json).unwrap();
        let Node::ItemList(list) = &doc.pages[0].items[0] else {
            panic!("expected ItemList");
        };
        assert!(list.direction.is_none());
    }

    #[test]
    fn unknown_class_is_rejected() {
        let json = r#"{ "width": 10, "height": 10, "pages": [{ "items": [
            { "class": "Image", "src": "x.png" } ] }] }"#;
        assert!(Document::from_json(json).is_err());
    }

    #[test]
    fn textbox_requires_font_family() {
        let json = r#"{ "width": 10, "height": 10, "pages": [{ "items": [
            { "class": "TextBox", "text": "a", "fontSize": 12 } ] }] }"#;
        assert!(Document::from_json(json).is_err());
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let json = r#"{ "width": 10, "height": 10, "pages": [{ "items": [
            { "class": "TextBox", "text": "a", "fontFamily": "Arial", "fontSize": 0 } ] }] }"#;
        let err = Document::from_json(json).unwrap_err();
        assert!(err.to_string().contains("fontSize"));
    }

    #[test]
    fn unknown_direction_value_is_rejected() {
        let json = r#"{ "width": 10, "height": 10, "pages": [{ "items": [
            { "class": "ItemList", "direction": "Diagonal", "list": [] } ] }] }"#;
        assert!(Document::from_json(json).is_err());
    }
}
