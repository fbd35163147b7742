use std::fmt;

use crossterm::style::{style, Color, Stylize};

/// Terminal color used to highlight an object class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingColor {
    Green,
    Yellow,
    Red,
    /// Anything that isn't one of the three well-known classes.
    Neutral,
}

impl RatingColor {
    /// Pick the color for a title-cased rating. Matching is exact and
    /// case-sensitive: "safe" is not "Safe".
    pub fn for_rating(rating: &str) -> Self {
        match rating {
            "Safe" => Self::Green,
            "Euclid" => Self::Yellow,
            "Keter" => Self::Red,
            _ => Self::Neutral,
        }
    }

    /// Wrap `text` in this color.
    ///
    /// Escapes are left out when crossterm has ANSI color disabled
    /// (`NO_COLOR`, or [`crossterm::style::Colored::set_ansi_color_disabled`]).
    pub fn paint(self, text: &str) -> String {
        style(text).with(Color::from(self)).to_string()
    }
}

impl From<RatingColor> for Color {
    fn from(color: RatingColor) -> Self {
        // Standard 8-color foregrounds, not the bright variants
        match color {
            RatingColor::Green => Color::DarkGreen,
            RatingColor::Yellow => Color::DarkYellow,
            RatingColor::Red => Color::DarkRed,
            RatingColor::Neutral => Color::Black,
        }
    }
}

impl fmt::Display for RatingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Neutral => "neutral",
        };
        f.write_str(name)
    }
}
