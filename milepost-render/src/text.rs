//! Text layout without a font engine.
//!
//! Widths are estimated from an average advance per character, which is
//! enough to wrap the short strings the map carries.

use milepost_core::Color;
use svg::node::element::Text;

/// Font family used for every label.
pub const FONT_FAMILY: &str = "Helvetica";

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.2;

/// Distance from the top of a line to its baseline, as a multiple of the
/// font size.
const ASCENT: f64 = 0.9;

/// Font weight of a [`TextStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }

    /// Average glyph advance as a multiple of the font size.
    const fn advance(self) -> f64 {
        match self {
            Self::Normal => 0.55,
            Self::Bold => 0.6,
        }
    }
}

/// Font settings for one block of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f64,
    /// Font weight.
    pub weight: FontWeight,
    /// Extra space between wrapped lines in pixels.
    pub spacing_px: f64,
}

impl TextStyle {
    /// Bold 16 px heading with 6 px line spacing.
    pub const TITLE: Self = Self {
        size_px: 16.0,
        weight: FontWeight::Bold,
        spacing_px: 6.0,
    };

    /// Regular 12 px body text.
    pub const BODY: Self = Self {
        size_px: 12.0,
        weight: FontWeight::Normal,
        spacing_px: 0.0,
    };

    /// Height of a single line.
    pub fn line_height(&self) -> f64 {
        self.size_px * LINE_HEIGHT
    }

    /// Height of `lines` wrapped lines including the spacing between them.
    pub fn block_height(&self, lines: usize) -> f64 {
        let Some(gaps) = lines.checked_sub(1) else {
            return 0.0;
        };
        let count = u32::try_from(lines).unwrap_or(u32::MAX);
        let gaps = u32::try_from(gaps).unwrap_or(u32::MAX);
        f64::from(count) * self.line_height() + f64::from(gaps) * self.spacing_px
    }

    /// Estimated rendered width of `text`.
    pub fn estimate_width(&self, text: &str) -> f64 {
        let glyphs = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        f64::from(glyphs) * self.size_px * self.weight.advance()
    }

    /// Greedily wrap `text` on whitespace so each line fits `max_width`.
    ///
    /// A single word wider than `max_width` keeps a line to itself.
    pub fn wrap(&self, text: &str, max_width: f64) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if self.estimate_width(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// A `<text>` element whose line box has its top-left corner at
    /// `(x, top)`.
    pub fn text(&self, content: &str, x: f64, top: f64, color: Color) -> Text {
        Text::new(content)
            .set("x", x)
            .set("y", top + self.size_px * ASCENT)
            .set("font-family", FONT_FAMILY)
            .set("font-size", self.size_px)
            .set("font-weight", self.weight.as_str())
            .set("fill", color.to_string())
    }
}
