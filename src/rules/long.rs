//! Long-password rules - floors on what a long password can score.

use super::{LengthRules, Reason, RuleResult};
use crate::features::CharacterStats;
use crate::label::StrengthLabel;

/// Long passwords with enough character types are Strong.
pub fn long_diverse_rule(stats: &CharacterStats, _model: StrengthLabel, rules: &LengthRules) -> RuleResult {
    let char_types = stats.char_types();
    if stats.length >= rules.diverse_length && char_types >= rules.diverse_min_types {
        return Some((
            StrengthLabel::Strong,
            Reason::LongAndDiverse {
                length: stats.length,
                char_types,
            },
        ));
    }
    None
}

/// Very long passwords are Strong whatever their composition.
pub fn very_long_rule(stats: &CharacterStats, _model: StrengthLabel, rules: &LengthRules) -> RuleResult {
    if stats.length >= rules.very_long_length {
        return Some((
            StrengthLabel::Strong,
            Reason::VeryLong {
                very_long_length: rules.very_long_length,
            },
        ));
    }
    None
}

/// Passwords of at least `not_weak_length` are lifted from Weak to Normal.
pub fn weak_floor_rule(stats: &CharacterStats, model: StrengthLabel, rules: &LengthRules) -> RuleResult {
    if stats.length >= rules.not_weak_length && model == StrengthLabel::Weak {
        return Some((
            StrengthLabel::Normal,
            Reason::TooLongToBeWeak {
                not_weak_length: rules.not_weak_length,
            },
        ));
    }
    None
}
