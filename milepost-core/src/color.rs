//! Colours, draw styles and the light/dark palettes.

use std::fmt;
use std::str::FromStr;

/// An opaque sRGB colour.
///
/// # Examples
/// ```
/// use milepost_core::Color;
///
/// assert_eq!(Color::rgb(255, 66, 0).to_string(), "#ff4200");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Construct a colour from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Construct a grey with equal channels.
    pub const fn grey(level: u8) -> Self {
        Self::rgb(level, level, level)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fill and stroke applied to a drawn shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    /// Interior colour.
    pub fill: Color,
    /// Outline colour, if the outline is drawn.
    pub stroke: Option<Color>,
    /// Outline width in pixels.
    pub stroke_width: f64,
}

impl DrawStyle {
    /// A filled shape without an outline.
    pub const fn filled(fill: Color) -> Self {
        Self {
            fill,
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// A filled shape with an outline.
    pub const fn outlined(fill: Color, stroke: Color, stroke_width: f64) -> Self {
        Self {
            fill,
            stroke: Some(stroke),
            stroke_width,
        }
    }
}

/// Output colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Pale sea and white land.
    #[default]
    Light,
    /// Near-black background with grey land.
    Dark,
}

impl ColorMode {
    /// Return the mode as a lowercase identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Select the mode from a `--dark` style flag.
    pub const fn from_dark_flag(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// The palette for this mode.
    pub const fn palette(self) -> Palette {
        Palette::for_mode(self)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("unknown colour mode: {s}")),
        }
    }
}

/// Colours used for the static parts of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Sea and page background.
    pub background: Color,
    /// Land and island fill.
    pub land: Color,
    /// Urban area fill.
    pub urban: Color,
    /// Title, date and legend text.
    pub text: Color,
}

impl Palette {
    /// Light palette.
    pub const LIGHT: Self = Self {
        background: Color::rgb(184, 224, 243),
        land: Color::WHITE,
        urban: Color::grey(242),
        text: Color::BLACK,
    };

    /// Dark palette.
    pub const DARK: Self = Self {
        background: Color::grey(17),
        land: Color::grey(65),
        urban: Color::grey(74),
        text: Color::grey(230),
    };

    /// Return the palette for `mode`.
    pub const fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Self::LIGHT,
            ColorMode::Dark => Self::DARK,
        }
    }

    /// Style for land and minor islands.
    pub const fn land_style(&self) -> DrawStyle {
        DrawStyle::filled(self.land)
    }

    /// Style for urban areas.
    pub const fn urban_style(&self) -> DrawStyle {
        DrawStyle::filled(self.urban)
    }
}
