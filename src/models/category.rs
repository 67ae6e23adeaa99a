//! Kakebo categories
//!
//! The Kakebo method sorts every expense into a small, fixed set of
//! envelopes. The set is closed: no category is added or removed at runtime,
//! so every mapping below is an exhaustive `match`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five Kakebo envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Essentials and fixed costs: rent, utilities, groceries
    Survival,
    /// Restaurants, streaming, hobbies, treats
    Leisure,
    /// Books, courses, work software
    Culture,
    /// Repairs, emergencies, gifts
    Extras,
    /// Explicitly left unclassified
    Uncategorized,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 5] = [
        Category::Survival,
        Category::Leisure,
        Category::Culture,
        Category::Extras,
        Category::Uncategorized,
    ];

    /// Category used when classification fails or returns nothing usable
    pub const FALLBACK: Category = Category::Extras;

    /// Map a classifier label to a category
    ///
    /// Labels are matched case-insensitively after trimming. Anything that is
    /// not one of the known labels falls back to [`Category::Extras`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "SURVIVAL" => Self::Survival,
            "LEISURE" => Self::Leisure,
            "CULTURE" => Self::Culture,
            "EXTRAS" => Self::Extras,
            "UNCATEGORIZED" => Self::Uncategorized,
            _ => Self::FALLBACK,
        }
    }

    /// Strict variant of [`Category::from_label`]: `None` for unknown labels
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "SURVIVAL" => Some(Self::Survival),
            "LEISURE" => Some(Self::Leisure),
            "CULTURE" => Some(Self::Culture),
            "EXTRAS" => Some(Self::Extras),
            "UNCATEGORIZED" => Some(Self::Uncategorized),
            _ => None,
        }
    }

    /// The wire label exchanged with collaborators
    pub fn label(&self) -> &'static str {
        match self {
            Self::Survival => "SURVIVAL",
            Self::Leisure => "LEISURE",
            Self::Culture => "CULTURE",
            Self::Extras => "EXTRAS",
            Self::Uncategorized => "UNCATEGORIZED",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Survival => "Survival",
            Self::Leisure => "Leisure & Vices",
            Self::Culture => "Culture & Study",
            Self::Extras => "Extras",
            Self::Uncategorized => "Uncategorized",
        }
    }

    /// Chart color used by front ends
    pub fn color(&self) -> &'static str {
        match self {
            Self::Survival => "#ef4444",
            Self::Leisure => "#f59e0b",
            Self::Culture => "#3b82f6",
            Self::Extras => "#8b5cf6",
            Self::Uncategorized => "#cbd5e1",
        }
    }

    /// Whether a classifier is allowed to return this category
    pub fn is_classifiable(&self) -> bool {
        !matches!(self, Self::Uncategorized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(Category::from_label("SURVIVAL"), Category::Survival);
        assert_eq!(Category::from_label("LEISURE"), Category::Leisure);
        assert_eq!(Category::from_label("CULTURE"), Category::Culture);
        assert_eq!(Category::from_label("EXTRAS"), Category::Extras);
        assert_eq!(Category::from_label(" survival\n"), Category::Survival);
    }

    #[test]
    fn test_unknown_label_falls_back_to_extras() {
        assert_eq!(Category::from_label(""), Category::Extras);
        assert_eq!(Category::from_label("GROCERIES"), Category::Extras);
        assert_eq!(Category::parse_label("GROCERIES"), None);
    }

    #[test]
    fn test_explicitly_unclassified() {
        assert_eq!(Category::from_label("UNCATEGORIZED"), Category::Uncategorized);
        assert!(!Category::Uncategorized.is_classifiable());
    }

    #[test]
    fn test_label_roundtrip_covers_all() {
        for category in Category::ALL {
            assert_eq!(Category::parse_label(category.label()), Some(category));
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Category::Survival).unwrap();
        assert_eq!(json, "\"SURVIVAL\"");
    }
}
