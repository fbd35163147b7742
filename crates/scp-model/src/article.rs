/// A single article fetched from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Page title, trimmed.
    pub title: String,
    /// Body text with the object class line rewritten to carry the
    /// (possibly colorized) rating.
    pub content: String,
    /// Title-cased object class, or [`UNKNOWN_RATING`] when none was found.
    pub rating: String,
}

/// Rating used when the body has no "object class:" line.
pub const UNKNOWN_RATING: &str = "Unknown";

impl Article {
    /// Whether an object class was found in the body.
    pub fn has_rating(&self) -> bool {
        self.rating != UNKNOWN_RATING
    }

    pub fn color(&self) -> crate::RatingColor {
        crate::RatingColor::for_rating(&self.rating)
    }
}
