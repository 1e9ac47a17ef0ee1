//! On-disk parameter artifact (JSON, versioned).
//!
//! Produced offline by the training pipeline; the serving side only reads it.

use serde::{Deserialize, Serialize};

use crate::features::NumericFeature;
use crate::rules::LengthRules;

/// Artifact format version understood by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// How per-class probabilities are derived from the linear scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    /// Softmax over all class scores.
    #[default]
    Multinomial,
    /// One-vs-rest: independent sigmoids, normalized.
    Ovr,
}

/// Normalization applied to the lexical block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    #[serde(default = "default_ngram")]
    pub ngram_min: usize,
    #[serde(default = "default_ngram")]
    pub ngram_max: usize,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_true")]
    pub normalize_whitespace: bool,
    #[serde(default)]
    pub norm: Norm,
    /// Vocabulary terms; position is the feature index.
    pub terms: Vec<String>,
    /// Inverse document frequency per term.
    pub idf: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub multi_class: MultiClass,
    pub vectorizer: VectorizerArtifact,
    #[serde(default = "default_numeric_features")]
    pub numeric_features: Vec<NumericFeature>,
    /// One row per class, in class-index order.
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub rules: LengthRules,
}

fn default_ngram() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_model_id() -> String {
    "unnamed".to_string()
}

fn default_numeric_features() -> Vec<NumericFeature> {
    NumericFeature::DEFAULT_LAYOUT.to_vec()
}
