//! Short-password rules - caps on what a short password can score.

use super::{LengthRules, Reason, RuleResult};
use crate::features::CharacterStats;
use crate::label::StrengthLabel;

/// An empty password is Weak.
pub fn empty_rule(stats: &CharacterStats, _model: StrengthLabel, _rules: &LengthRules) -> RuleResult {
    (stats.length == 0).then_some((StrengthLabel::Weak, Reason::Empty))
}

/// Passwords shorter than `min_length` are Weak regardless of diversity.
pub fn too_short_rule(stats: &CharacterStats, _model: StrengthLabel, rules: &LengthRules) -> RuleResult {
    if stats.length < rules.min_length {
        return Some((
            StrengthLabel::Weak,
            Reason::TooShort {
                min_length: rules.min_length,
            },
        ));
    }
    None
}

/// Passwords shorter than `strong_min_length` cannot be Strong.
pub fn strong_cap_rule(stats: &CharacterStats, model: StrengthLabel, rules: &LengthRules) -> RuleResult {
    if stats.length < rules.strong_min_length && model == StrengthLabel::Strong {
        return Some((
            StrengthLabel::Normal,
            Reason::TooShortToBeStrong {
                strong_min_length: rules.strong_min_length,
            },
        ));
    }
    None
}
