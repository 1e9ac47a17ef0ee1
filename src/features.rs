//! Feature extraction - turns a password into the model's input vector.
//!
//! The vector layout is `[lexical block, numeric block]`: one TF-IDF weight
//! per vocabulary term, followed by the numeric features the model artifact
//! declares, in declaration order.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::model::PasswordModel;

/// Number of character classes tracked (lowercase, uppercase, digit, symbol).
pub const CHARACTER_CLASSES: usize = 4;

/// Character-class statistics of a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CharacterStats {
    /// Length in characters.
    pub length: usize,
    pub lowercase: usize,
    pub uppercase: usize,
    pub digits: usize,
    pub symbols: usize,
}

impl CharacterStats {
    /// Counts each character in the first class it matches.
    ///
    /// Only ASCII digits count as digits; other Unicode digits are
    /// alphanumeric, so they count toward neither digits nor symbols.
    pub fn from_password(pwd: &str) -> Self {
        let mut stats = CharacterStats::default();
        for c in pwd.chars() {
            stats.length += 1;
            if c.is_lowercase() {
                stats.lowercase += 1;
            } else if c.is_uppercase() {
                stats.uppercase += 1;
            } else if c.is_ascii_digit() {
                stats.digits += 1;
            } else if !c.is_alphanumeric() {
                stats.symbols += 1;
            }
        }
        stats
    }

    /// Share of the password made of `count` characters, 0 for empty input.
    fn ratio(&self, count: usize) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            count as f64 / self.length as f64
        }
    }

    pub fn lowercase_ratio(&self) -> f64 {
        self.ratio(self.lowercase)
    }

    pub fn uppercase_ratio(&self) -> f64 {
        self.ratio(self.uppercase)
    }

    pub fn digit_ratio(&self) -> f64 {
        self.ratio(self.digits)
    }

    pub fn symbol_ratio(&self) -> f64 {
        self.ratio(self.symbols)
    }

    /// How many of the four character classes appear at least once.
    pub fn char_types(&self) -> usize {
        [self.lowercase, self.uppercase, self.digits, self.symbols]
            .iter()
            .filter(|&&n| n > 0)
            .count()
    }
}

/// A numeric (non-lexical) feature the model can be trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericFeature {
    Length,
    LowercaseCount,
    UppercaseCount,
    DigitCount,
    SymbolCount,
    LowercaseRatio,
    UppercaseRatio,
    DigitRatio,
    SymbolRatio,
    CharTypes,
}

impl NumericFeature {
    /// Layout used when the artifact does not declare one.
    pub const DEFAULT_LAYOUT: [NumericFeature; 4] = [
        NumericFeature::Length,
        NumericFeature::LowercaseRatio,
        NumericFeature::UppercaseRatio,
        NumericFeature::DigitRatio,
    ];

    pub fn value(self, stats: &CharacterStats) -> f64 {
        match self {
            NumericFeature::Length => stats.length as f64,
            NumericFeature::LowercaseCount => stats.lowercase as f64,
            NumericFeature::UppercaseCount => stats.uppercase as f64,
            NumericFeature::DigitCount => stats.digits as f64,
            NumericFeature::SymbolCount => stats.symbols as f64,
            NumericFeature::LowercaseRatio => stats.lowercase_ratio(),
            NumericFeature::UppercaseRatio => stats.uppercase_ratio(),
            NumericFeature::DigitRatio => stats.digit_ratio(),
            NumericFeature::SymbolRatio => stats.symbol_ratio(),
            NumericFeature::CharTypes => stats.char_types() as f64,
        }
    }
}

/// Model input vector for one password.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
    lexical_width: usize,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// The TF-IDF block.
    pub fn lexical(&self) -> &[f64] {
        &self.values[..self.lexical_width]
    }

    /// The numeric block, in the model's declared order.
    pub fn numeric(&self) -> &[f64] {
        &self.values[self.lexical_width..]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extracts the feature vector of `password` using the model's vocabulary
/// and numeric layout. Never fails; absent features are zero.
pub fn extract_features(model: &PasswordModel, password: &SecretString) -> FeatureVector {
    let pwd = password.expose_secret();
    let stats = CharacterStats::from_password(pwd);
    features_from_parts(model, pwd, &stats)
}

pub(crate) fn features_from_parts(
    model: &PasswordModel,
    pwd: &str,
    stats: &CharacterStats,
) -> FeatureVector {
    let mut values = model.vectorizer().transform(pwd);
    let lexical_width = values.len();
    values.extend(model.numeric_features().iter().map(|f| f.value(stats)));

    FeatureVector {
        values,
        lexical_width,
    }
}
