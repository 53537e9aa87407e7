//! # Fonts
//!
//! Font specs as handed to a surface, the standard PDF fonts they resolve
//! to, and the [`Measure`] capability.
//!
//! Real shaping and font embedding belong to whatever surface paints the
//! placements. What lives here is the subset the built-in PDF surface needs:
//! the 12 Latin standard fonts and their AFM advance widths.

pub mod metrics;

use serde::Serialize;

pub use metrics::StandardFontMetrics;

use crate::model::{FontStyle, FontWeight};

/// A font request in points, as assembled by the positioning engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    /// Size in points.
    pub size: f64,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.style == FontStyle::Italic
    }
}

/// Result of measuring a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    /// Distance from the top of the run's box to its baseline.
    pub baseline: f64,
}

/// Measures text in a given font.
pub trait Measure {
    fn measure(&self, text: &str, font: &FontSpec) -> TextMetrics;
}

/// The 12 Latin standard PDF fonts. No embedding needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// Resolve a font spec to a standard font, falling back to Helvetica
    /// for families we don't know.
    pub fn resolve(font: &FontSpec) -> Self {
        let family = font.family.to_ascii_lowercase();
        let (bold, italic) = (font.is_bold(), font.is_italic());
        let times = family.starts_with("times") || (family.contains("serif") && !family.contains("sans"));
        let courier = family.starts_with("courier") || family.contains("mono");

        match (times, courier, bold, italic) {
            (true, _, false, false) => Self::TimesRoman,
            (true, _, true, false) => Self::TimesBold,
            (true, _, false, true) => Self::TimesItalic,
            (true, _, true, true) => Self::TimesBoldItalic,
            (_, true, false, false) => Self::Courier,
            (_, true, true, false) => Self::CourierBold,
            (_, true, false, true) => Self::CourierOblique,
            (_, true, true, true) => Self::CourierBoldOblique,
            (_, _, false, false) => Self::Helvetica,
            (_, _, true, false) => Self::HelveticaBold,
            (_, _, false, true) => Self::HelveticaOblique,
            (_, _, true, true) => Self::HelveticaBoldOblique,
        }
    }

    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Width tables. Obliques share their upright widths; the Times bold and
    /// italic faces approximate with Times-Roman.
    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica | Self::HelveticaOblique => &metrics::HELVETICA,
            Self::HelveticaBold | Self::HelveticaBoldOblique => &metrics::HELVETICA_BOLD,
            Self::TimesRoman | Self::TimesBold | Self::TimesItalic | Self::TimesBoldItalic => {
                &metrics::TIMES_ROMAN
            }
            Self::Courier
            | Self::CourierBold
            | Self::CourierOblique
            | Self::CourierBoldOblique => &metrics::COURIER,
        }
    }
}

/// [`Measure`] backed by the standard font AFM widths.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardMetrics;

impl Measure for StandardMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> TextMetrics {
        let m = StandardFont::resolve(font).metrics();
        let ascent = m.ascent as f64 / 1000.0 * font.size;
        let descent = -(m.descent as f64) / 1000.0 * font.size;
        TextMetrics {
            width: m.measure_string(text, font.size),
            height: ascent + descent,
            baseline: ascent,
        }
    }
}
