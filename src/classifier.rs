//! Password strength classifier - scoring and correction pipeline.

use std::path::Path;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::features::{features_from_parts, CharacterStats, FeatureVector};
use crate::label::{StrengthLabel, CLASS_COUNT};
use crate::model::{get_model_path, ModelError, PasswordModel};
use crate::rules::{apply_corrections, Reason};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Outcome of classifying one password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Final label, after corrections.
    pub label: StrengthLabel,
    /// Arg-max label of the linear model, before corrections.
    pub model_label: StrengthLabel,
    /// Raw linear score per class, in class-index order.
    pub scores: [f64; CLASS_COUNT],
    pub probabilities: [f64; CLASS_COUNT],
    pub reason: Reason,
    pub stats: CharacterStats,
}

impl Classification {
    /// Whether a correction rule overrode the model.
    pub fn is_corrected(&self) -> bool {
        self.reason.is_correction()
    }

    pub fn probability(&self, label: StrengthLabel) -> f64 {
        self.probabilities[label.index()]
    }
}

/// Handle to a loaded model. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: Arc<PasswordModel>,
}

impl Classifier {
    pub fn new(model: PasswordModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Loads the model from `PWD_MODEL_PATH`, or `./assets/password_model.json`.
    ///
    /// A failure here is fatal: there is no classifier without valid parameters.
    pub fn load() -> Result<Self, ModelError> {
        Self::load_from_path(get_model_path())
    }

    /// Loads the model from a specific artifact path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        PasswordModel::from_path(path).map(Self::new)
    }

    /// Loads the model from an in-memory JSON artifact.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        PasswordModel::from_json(json).map(Self::new)
    }

    pub fn model(&self) -> &PasswordModel {
        &self.model
    }

    /// Extracts the model input vector for `password`.
    pub fn extract_features(&self, password: &SecretString) -> FeatureVector {
        self.analyze(password.expose_secret()).1
    }

    /// Classifies a password. Never fails and is deterministic for a given model.
    pub fn classify(&self, password: &SecretString) -> Classification {
        self.classify_str(password.expose_secret())
    }

    /// Classifies raw bytes, which must be valid UTF-8.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Classification, ClassifyError> {
        let pwd = std::str::from_utf8(bytes).map_err(|e| {
            ClassifyError::InvalidArgument(format!(
                "password is not valid UTF-8 (byte {})",
                e.valid_up_to()
            ))
        })?;
        Ok(self.classify_str(pwd))
    }

    /// Classifies a password, checking `token` between stages.
    ///
    /// Returns `None` if the evaluation was cancelled.
    #[cfg(feature = "async")]
    pub fn classify_with_cancel(
        &self,
        password: &SecretString,
        token: &CancellationToken,
    ) -> Option<Classification> {
        self.classify_staged(password.expose_secret(), || token.is_cancelled())
    }

    /// Runs features, scoring and corrections, polling `is_cancelled`
    /// before each stage.
    #[cfg(feature = "async")]
    fn classify_staged(
        &self,
        pwd: &str,
        is_cancelled: impl Fn() -> bool,
    ) -> Option<Classification> {
        if is_cancelled() {
            return None;
        }
        let (stats, features) = self.analyze(pwd);

        if is_cancelled() {
            return None;
        }
        let scored = self.score(&features);

        if is_cancelled() {
            return None;
        }
        Some(self.correct(stats, scored))
    }

    fn classify_str(&self, pwd: &str) -> Classification {
        let (stats, features) = self.analyze(pwd);
        let scored = self.score(&features);
        self.correct(stats, scored)
    }

    fn analyze(&self, pwd: &str) -> (CharacterStats, FeatureVector) {
        let stats = CharacterStats::from_password(pwd);
        let features = features_from_parts(&self.model, pwd, &stats);
        (stats, features)
    }

    fn score(&self, features: &FeatureVector) -> Scored {
        let scores = self.model.scores(features);
        Scored {
            scores,
            probabilities: self.model.probabilities(&scores),
            model_label: self.model.predict(&scores),
        }
    }

    fn correct(&self, stats: CharacterStats, scored: Scored) -> Classification {
        let (label, reason) = apply_corrections(&stats, scored.model_label, self.model.rules());

        Classification {
            label,
            model_label: scored.model_label,
            scores: scored.scores,
            probabilities: scored.probabilities,
            reason,
            stats,
        }
    }
}

/// Model output before corrections.
struct Scored {
    scores: [f64; CLASS_COUNT],
    probabilities: [f64; CLASS_COUNT],
    model_label: StrengthLabel,
}

/// Delay before a keystroke-triggered evaluation starts.
#[cfg(feature = "async")]
pub const DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Async version that sends the classification via channel.
///
/// Nothing is sent if `token` is cancelled before the evaluation finishes.
#[cfg(feature = "async")]
pub async fn classify_tx(
    classifier: &Classifier,
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<Classification>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("classification is about to start...");

    tokio::time::sleep(DEBOUNCE).await;
    let Some(classification) = classifier.classify_with_cancel(password, &token) else {
        #[cfg(feature = "tracing")]
        tracing::debug!("classification cancelled");
        return;
    };

    if let Err(e) = tx.send(classification).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password classification: {}", e);
    }
}
