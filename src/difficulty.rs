use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// How much of the passage stays visible ahead of the cursor while typing
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Number of not-yet-typed characters revealed ahead of the cursor
    pub fn hint_window(self) -> usize {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 3,
            Difficulty::Hard => 0,
        }
    }

    pub fn hint_text(self) -> &'static str {
        match self {
            Difficulty::Easy => "Hints enabled: partial words are visible.",
            Difficulty::Medium => "Harder: only the next few letters are visible.",
            Difficulty::Hard => "Expert: the text is completely hidden.",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Difficulty::Easy => Color::Green,
            Difficulty::Medium => Color::Yellow,
            Difficulty::Hard => Color::Red,
        }
    }

    /// Position in `ALL`, used by the difficulty picker
    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_windows() {
        assert_eq!(Difficulty::Easy.hint_window(), 15);
        assert_eq!(Difficulty::Medium.hint_window(), 3);
        assert_eq!(Difficulty::Hard.hint_window(), 0);
    }

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(Difficulty::Easy.to_string(), "EASY");
        assert_eq!(Difficulty::Medium.to_string(), "MEDIUM");
        assert_eq!(Difficulty::Hard.to_string(), "HARD");
    }

    #[test]
    fn test_default_is_easy() {
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn test_index_roundtrip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_index(d.index()), Some(d));
        }
        assert_eq!(Difficulty::from_index(3), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }
}
