//! Password strength classification library
//!
//! Scores passwords as Weak, Normal or Strong with a pre-trained linear
//! model over TF-IDF character n-grams and character-class features,
//! followed by length-based corrections for the cases the model gets wrong.
//!
//! # Features
//!
//! - `async` (default): Enables debounced async classification with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_MODEL_PATH`: Custom path to the model artifact
//!   (default: `./assets/password_model.json`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_strength_ml::Classifier;
//! use secrecy::SecretString;
//!
//! // Load the model (call once at startup)
//! let classifier = Classifier::load().expect("Failed to load model");
//!
//! // Classify a password
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = classifier.classify(&password);
//!
//! println!("Strength: {}", result.label);
//! println!("Reason: {}", result.reason);
//! ```

// Internal modules
mod classifier;
mod features;
mod label;
mod model;
mod rules;

// Public API
pub use classifier::{Classification, Classifier, ClassifyError};
pub use features::{extract_features, CharacterStats, FeatureVector, NumericFeature};
pub use label::{StrengthLabel, CLASS_COUNT};
pub use model::{
    get_model_path, ModelArtifact, ModelError, MultiClass, Norm, PasswordModel, TfidfVectorizer,
    VectorizerArtifact, FORMAT_VERSION, MODEL_PATH_ENV,
};
pub use rules::{apply_corrections, LengthRules, Reason};

#[cfg(feature = "async")]
pub use classifier::{classify_tx, DEBOUNCE};
