//! Strength labels produced by the classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of strength classes the model scores.
pub const CLASS_COUNT: usize = 3;

/// Password strength class, ordered from weakest to strongest.
///
/// The discriminant is the class index used by the model's weight rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLabel {
    Weak = 0,
    Normal = 1,
    Strong = 2,
}

impl StrengthLabel {
    /// All labels in class-index order.
    pub const ALL: [StrengthLabel; CLASS_COUNT] =
        [StrengthLabel::Weak, StrengthLabel::Normal, StrengthLabel::Strong];

    /// Class index of this label.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label for a class index, `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Normal => "Normal",
            StrengthLabel::Strong => "Strong",
        }
    }

    /// Improvement tips shown next to a result of this strength.
    pub fn advice(self) -> &'static [&'static str] {
        match self {
            StrengthLabel::Weak => &[
                "Increase length to at least 12 characters",
                "Add uppercase letters (A-Z)",
                "Include numbers (0-9)",
                "Use special characters (!@#$%^&*)",
            ],
            StrengthLabel::Normal => &[
                "Increase length to 18+ characters",
                "Add more character variety",
                "Avoid common words or patterns",
                "Consider using a passphrase",
            ],
            StrengthLabel::Strong => &[
                "Use a unique password for each account",
                "Consider using a password manager",
                "Enable two-factor authentication when possible",
                "Change passwords regularly",
            ],
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_ordered_by_strength() {
        assert!(StrengthLabel::Weak < StrengthLabel::Normal);
        assert!(StrengthLabel::Normal < StrengthLabel::Strong);
    }

    #[test]
    fn test_index_matches_class_row() {
        for (i, label) in StrengthLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(StrengthLabel::from_index(i), Some(*label));
        }
        assert_eq!(StrengthLabel::from_index(CLASS_COUNT), None);
    }

    #[test]
    fn test_advice_is_never_empty() {
        for label in StrengthLabel::ALL {
            assert!(!label.advice().is_empty());
        }
    }

    #[test]
    fn test_every_label_has_four_tips() {
        for label in StrengthLabel::ALL {
            assert_eq!(label.advice().len(), 4, "{label}");
        }
        assert!(StrengthLabel::Strong.advice().contains(&"Change passwords regularly"));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&StrengthLabel::Normal).unwrap();
        assert_eq!(json, "\"normal\"");
        let label: StrengthLabel = serde_json::from_str("\"strong\"").unwrap();
        assert_eq!(label, StrengthLabel::Strong);
    }
}
