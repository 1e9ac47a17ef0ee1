//! Model parameters - loading, validation and scoring.
//!
//! The parameters are loaded once from a versioned JSON artifact and are
//! immutable afterwards.

pub mod artifact;
mod math;
mod vectorizer;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::features::{FeatureVector, NumericFeature};
use crate::label::{StrengthLabel, CLASS_COUNT};
use crate::rules::LengthRules;

pub use artifact::{ModelArtifact, MultiClass, Norm, VectorizerArtifact, FORMAT_VERSION};
pub use vectorizer::TfidfVectorizer;

/// Environment variable naming the artifact path.
pub const MODEL_PATH_ENV: &str = "PWD_MODEL_PATH";

const DEFAULT_MODEL_PATH: &str = "./assets/password_model.json";

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read model file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Model file is empty")]
    EmptyFile,
    #[error("Failed to parse model JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("Unsupported model format version {0}")]
    UnsupportedVersion(u32),
    #[error("{what} dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Non-finite {what}: {value}")]
    NonFiniteParameter { what: String, value: f64 },
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),
    #[error("Invalid correction rules: {0}")]
    InvalidRules(String),
}

/// Returns the model artifact path.
///
/// Priority:
/// 1. Environment variable `PWD_MODEL_PATH`
/// 2. Default path `./assets/password_model.json`
pub fn get_model_path() -> PathBuf {
    std::env::var(MODEL_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH))
}

/// Fitted classifier parameters.
#[derive(Debug, Clone)]
pub struct PasswordModel {
    model_id: String,
    multi_class: MultiClass,
    vectorizer: TfidfVectorizer,
    numeric_features: Vec<NumericFeature>,
    weights: [Vec<f64>; CLASS_COUNT],
    bias: [f64; CLASS_COUNT],
    rules: LengthRules,
}

impl PasswordModel {
    /// Validates an artifact and builds the runtime model from it.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion(artifact.format_version));
        }

        let vectorizer = TfidfVectorizer::from_artifact(artifact.vectorizer)?;
        let width = vectorizer.len() + artifact.numeric_features.len();

        let weights: [Vec<f64>; CLASS_COUNT] =
            artifact
                .weights
                .try_into()
                .map_err(|rows: Vec<Vec<f64>>| ModelError::DimensionMismatch {
                    what: "weight rows",
                    expected: CLASS_COUNT,
                    got: rows.len(),
                })?;
        for (class, row) in weights.iter().enumerate() {
            if row.len() != width {
                return Err(ModelError::DimensionMismatch {
                    what: "weight row",
                    expected: width,
                    got: row.len(),
                });
            }
            if let Some((i, &value)) = row.iter().enumerate().find(|(_, w)| !w.is_finite()) {
                return Err(ModelError::NonFiniteParameter {
                    what: format!("weight[{class}][{i}]"),
                    value,
                });
            }
        }

        let bias: [f64; CLASS_COUNT] =
            artifact
                .bias
                .try_into()
                .map_err(|b: Vec<f64>| ModelError::DimensionMismatch {
                    what: "bias",
                    expected: CLASS_COUNT,
                    got: b.len(),
                })?;
        if let Some((class, &value)) = bias.iter().enumerate().find(|(_, b)| !b.is_finite()) {
            return Err(ModelError::NonFiniteParameter {
                what: format!("bias[{class}]"),
                value,
            });
        }

        artifact.rules.validate()?;

        Ok(Self {
            model_id: artifact.model_id,
            multi_class: artifact.multi_class,
            vectorizer,
            numeric_features: artifact.numeric_features,
            weights,
            bias,
            rules: artifact.rules,
        })
    }

    /// Parses and validates a JSON artifact.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        if json.trim().is_empty() {
            return Err(ModelError::EmptyFile);
        }
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Loads the model from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    /// - The artifact is malformed or inconsistent
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Model load FAILED: FileNotFound {:?}", path);
            return Err(ModelError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        match Self::from_json(&content) {
            Ok(model) => {
                #[cfg(feature = "tracing")]
                tracing::info!(
                    "Model {} loaded from {:?}: {} terms, {} features",
                    model.model_id,
                    path,
                    model.vectorizer.len(),
                    model.feature_width()
                );
                Ok(model)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Model load FAILED for {:?}: {}", path, e);
                Err(e)
            }
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn multi_class(&self) -> MultiClass {
        self.multi_class
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn numeric_features(&self) -> &[NumericFeature] {
        &self.numeric_features
    }

    pub fn rules(&self) -> &LengthRules {
        &self.rules
    }

    /// Length of the feature vector this model expects.
    pub fn feature_width(&self) -> usize {
        self.vectorizer.len() + self.numeric_features.len()
    }

    /// Raw linear score per class: `dot(weights[c], features) + bias[c]`.
    pub fn scores(&self, features: &FeatureVector) -> [f64; CLASS_COUNT] {
        std::array::from_fn(|c| math::dot(&self.weights[c], features.as_slice()) + self.bias[c])
    }

    /// Per-class probabilities for the given scores.
    pub fn probabilities(&self, scores: &[f64; CLASS_COUNT]) -> [f64; CLASS_COUNT] {
        match self.multi_class {
            MultiClass::Multinomial => math::softmax(scores),
            MultiClass::Ovr => math::ovr(scores),
        }
    }

    /// Arg-max label; ties go to the weaker class.
    pub fn predict(&self, scores: &[f64; CLASS_COUNT]) -> StrengthLabel {
        match StrengthLabel::from_index(math::argmax(scores)) {
            Some(label) => label,
            None => StrengthLabel::Weak,
        }
    }
}
