//! Millennium Milepost designs and their symbol colours.

use std::fmt;

use crate::{Color, DrawStyle, Tags};

/// OSM tag key naming the milepost design.
pub const MILEPOST_TAG: &str = "ncn_milepost";

/// Fill and outline of a milepost symbol.
pub type CategoryColors = DrawStyle;

/// Diameter of a milepost marker on the map, in pixels.
pub const MARKER_DIAMETER: f64 = 6.0;

/// Outline width of a milepost marker, in pixels.
pub const MARKER_STROKE_WIDTH: f64 = 0.75;

/// The four cast-iron milepost designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilepostCategory {
    /// The `mills` design.
    Mills,
    /// The `rowe` design.
    Rowe,
    /// The `mccoll` design.
    McColl,
    /// The `dudgeon` design.
    Dudgeon,
}

impl MilepostCategory {
    /// Categories in the order they are drawn and listed in the legend.
    pub const DRAWN: [Self; 4] = [Self::Mills, Self::Rowe, Self::McColl, Self::Dudgeon];

    /// Return the tag value identifying the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mills => "mills",
            Self::Rowe => "rowe",
            Self::McColl => "mccoll",
            Self::Dudgeon => "dudgeon",
        }
    }

    /// Human-readable legend label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mills => "Mills",
            Self::Rowe => "Rowe",
            Self::McColl => "McColl",
            Self::Dudgeon => "Dudgeon",
        }
    }

    /// Resolve a category from the exact tag value.
    ///
    /// Matching is case-sensitive; `"Mills"` is not a category.
    ///
    /// # Examples
    /// ```
    /// use milepost_core::MilepostCategory;
    ///
    /// assert_eq!(MilepostCategory::from_tag_value("rowe"), Some(MilepostCategory::Rowe));
    /// assert_eq!(MilepostCategory::from_tag_value("Rowe"), None);
    /// ```
    pub fn from_tag_value(value: &str) -> Option<Self> {
        Self::DRAWN
            .into_iter()
            .find(|category| category.as_str() == value)
    }

    /// Resolve the category of a tagged point.
    pub fn from_tags(tags: &Tags) -> Option<Self> {
        tags.get(MILEPOST_TAG)
            .and_then(|value| Self::from_tag_value(value))
    }

    /// Symbol colours for the category.
    pub const fn colors(self) -> CategoryColors {
        let fill = match self {
            Self::Mills => Color::rgb(0xff, 0x42, 0x00),
            Self::Rowe => Color::rgb(0x58, 0xb5, 0x3d),
            Self::McColl => Color::rgb(0x5f, 0xe4, 0xff),
            Self::Dudgeon => Color::rgb(0xff, 0xf0, 0x20),
        };
        DrawStyle::outlined(fill, Color::BLACK, MARKER_STROKE_WIDTH)
    }
}

impl fmt::Display for MilepostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mills", Some(MilepostCategory::Mills))]
    #[case("rowe", Some(MilepostCategory::Rowe))]
    #[case("mccoll", Some(MilepostCategory::McColl))]
    #[case("dudgeon", Some(MilepostCategory::Dudgeon))]
    #[case("Mills", None)]
    #[case("unknown", None)]
    #[case("", None)]
    fn resolves_tag_values(#[case] value: &str, #[case] expected: Option<MilepostCategory>) {
        assert_eq!(MilepostCategory::from_tag_value(value), expected);
    }

    #[rstest]
    fn missing_tag_has_no_category() {
        let tags = Tags::from([("name".to_owned(), "Rowe post".to_owned())]);
        assert_eq!(MilepostCategory::from_tags(&tags), None);
    }

    #[rstest]
    #[case(MilepostCategory::Mills, "#ff4200")]
    #[case(MilepostCategory::Rowe, "#58b53d")]
    #[case(MilepostCategory::McColl, "#5fe4ff")]
    #[case(MilepostCategory::Dudgeon, "#fff020")]
    fn fills_match_designs(#[case] category: MilepostCategory, #[case] fill: &str) {
        let colors = category.colors();
        assert_eq!(colors.fill.to_string(), fill);
        assert_eq!(colors.stroke, Some(Color::BLACK));
    }
}
