use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of questions the presentation layer can ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// "Where do the ranges overlap?"
    Overlap,
    /// "Who values the asset highest, and why?"
    Highest,
    /// "Who values the asset lowest, and why?"
    Lowest,
    /// "Who is most likely to win?"
    Winner,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::Overlap,
        QuestionKind::Highest,
        QuestionKind::Lowest,
        QuestionKind::Winner,
    ];

    /// Parse an exact wire name. Anything else, including other casings, is `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "overlap" => Some(QuestionKind::Overlap),
            "highest" => Some(QuestionKind::Highest),
            "lowest" => Some(QuestionKind::Lowest),
            "winner" => Some(QuestionKind::Winner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Overlap => "overlap",
            QuestionKind::Highest => "highest",
            QuestionKind::Lowest => "lowest",
            QuestionKind::Winner => "winner",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            QuestionKind::Overlap => "Where do the valuation ranges overlap?",
            QuestionKind::Highest => "Who has the highest valuation, and why?",
            QuestionKind::Lowest => "Who has the lowest valuation, and why?",
            QuestionKind::Winner => "Who is most likely to win?",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_only_exact_wire_names() {
        assert_eq!(QuestionKind::parse("overlap"), Some(QuestionKind::Overlap));
        assert_eq!(QuestionKind::parse("Overlap"), None);
        assert_eq!(QuestionKind::parse("OVERLAP"), None);
        assert_eq!(QuestionKind::parse(" winner "), None);
        assert_eq!(QuestionKind::parse("median"), None);
        assert_eq!(QuestionKind::parse(""), None);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for kind in QuestionKind::ALL {
            assert_eq!(QuestionKind::parse(kind.as_str()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
