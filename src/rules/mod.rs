//! Post-model corrections
//!
//! The linear model is trained on a finite sample and misjudges passwords at
//! the length extremes. Each rule here inspects the character statistics and
//! the model's label and may override it. Rules run in a fixed order and the
//! first one that fires decides.

mod long;
mod short;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::features::{CharacterStats, CHARACTER_CLASSES};
use crate::label::StrengthLabel;
use crate::model::ModelError;

pub use long::{long_diverse_rule, very_long_rule, weak_floor_rule};
pub use short::{empty_rule, strong_cap_rule, too_short_rule};

/// Result type for rule functions.
/// - `Some((label, reason))` - rule fired and overrides the model
/// - `None` - rule does not apply
pub type RuleResult = Option<(StrengthLabel, Reason)>;

type Rule = fn(&CharacterStats, StrengthLabel, &LengthRules) -> RuleResult;

/// Length thresholds for the corrections, shipped with the model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthRules {
    /// Shorter passwords are always Weak.
    pub min_length: usize,
    /// Shorter passwords are never Strong.
    pub strong_min_length: usize,
    /// From this length, passwords with enough character types are Strong.
    pub diverse_length: usize,
    pub diverse_min_types: usize,
    /// From this length, passwords are always Strong.
    pub very_long_length: usize,
    /// From this length, passwords are never Weak.
    pub not_weak_length: usize,
}

impl Default for LengthRules {
    fn default() -> Self {
        Self {
            min_length: 7,
            strong_min_length: 13,
            diverse_length: 18,
            diverse_min_types: 3,
            very_long_length: 30,
            not_weak_length: 15,
        }
    }
}

impl LengthRules {
    /// Checks the thresholds are consistent with each other.
    pub fn validate(&self) -> Result<(), ModelError> {
        let ordered = [
            ("min_length", self.min_length, "strong_min_length", self.strong_min_length),
            ("min_length", self.min_length, "not_weak_length", self.not_weak_length),
            ("strong_min_length", self.strong_min_length, "diverse_length", self.diverse_length),
            ("diverse_length", self.diverse_length, "very_long_length", self.very_long_length),
        ];
        for (low_name, low, high_name, high) in ordered {
            if low > high {
                return Err(ModelError::InvalidRules(format!(
                    "{low_name} ({low}) exceeds {high_name} ({high})"
                )));
            }
        }
        if self.not_weak_length == 0 {
            return Err(ModelError::InvalidRules(
                "not_weak_length must be at least 1".to_string(),
            ));
        }
        if self.diverse_min_types > CHARACTER_CLASSES {
            return Err(ModelError::InvalidRules(format!(
                "diverse_min_types ({}) exceeds {}",
                self.diverse_min_types, CHARACTER_CLASSES
            )));
        }
        Ok(())
    }
}

/// Why a password received its final label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    Empty,
    TooShort { min_length: usize },
    TooShortToBeStrong { strong_min_length: usize },
    LongAndDiverse { length: usize, char_types: usize },
    VeryLong { very_long_length: usize },
    TooLongToBeWeak { not_weak_length: usize },
    Model,
}

impl Reason {
    /// Whether a rule overrode the model.
    pub fn is_correction(&self) -> bool {
        !matches!(self, Reason::Model)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Empty => write!(f, "Empty password"),
            Reason::TooShort { min_length } => {
                write!(f, "Too short (fewer than {min_length} characters)")
            }
            Reason::TooShortToBeStrong { strong_min_length } => write!(
                f,
                "Too short to be strong (fewer than {strong_min_length} characters)"
            ),
            Reason::LongAndDiverse { length, char_types } => write!(
                f,
                "Long password ({length} chars) with good diversity ({char_types}/{} types)",
                CHARACTER_CLASSES
            ),
            Reason::VeryLong { very_long_length } => {
                write!(f, "Very long password (at least {very_long_length} characters)")
            }
            Reason::TooLongToBeWeak { not_weak_length } => {
                write!(f, "Too long to be weak (at least {not_weak_length} characters)")
            }
            Reason::Model => write!(f, "Model prediction"),
        }
    }
}

/// Applies the corrections to the model's label.
///
/// Returns the final label and the reason for it.
pub fn apply_corrections(
    stats: &CharacterStats,
    model_label: StrengthLabel,
    rules: &LengthRules,
) -> (StrengthLabel, Reason) {
    let chain: [(&str, Rule); 6] = [
        ("empty", empty_rule),
        ("too_short", too_short_rule),
        ("strong_cap", strong_cap_rule),
        ("long_diverse", long_diverse_rule),
        ("very_long", very_long_rule),
        ("weak_floor", weak_floor_rule),
    ];

    for (rule_name, rule_fn) in chain {
        if let Some((label, reason)) = rule_fn(stats, model_label, rules) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Rule {} corrected {} -> {}",
                rule_name,
                model_label,
                label
            );
            return (label, reason);
        }
    }

    (model_label, Reason::Model)
}
