//! Character n-gram TF-IDF vectorizer with a fixed, pre-fit vocabulary.

use std::collections::HashMap;

use super::artifact::{Norm, VectorizerArtifact};
use super::ModelError;

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    index: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_min: usize,
    ngram_max: usize,
    lowercase: bool,
    sublinear_tf: bool,
    normalize_whitespace: bool,
    norm: Norm,
}

impl TfidfVectorizer {
    pub(crate) fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ModelError> {
        if artifact.ngram_min == 0 || artifact.ngram_min > artifact.ngram_max {
            return Err(ModelError::InvalidVocabulary(format!(
                "invalid n-gram range {}..={}",
                artifact.ngram_min, artifact.ngram_max
            )));
        }
        if artifact.terms.len() != artifact.idf.len() {
            return Err(ModelError::DimensionMismatch {
                what: "idf",
                expected: artifact.terms.len(),
                got: artifact.idf.len(),
            });
        }
        if let Some((i, &value)) = artifact.idf.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteParameter {
                what: format!("idf[{i}]"),
                value,
            });
        }

        let mut index = HashMap::with_capacity(artifact.terms.len());
        for (i, term) in artifact.terms.into_iter().enumerate() {
            if term.is_empty() {
                return Err(ModelError::InvalidVocabulary(format!("empty term at {i}")));
            }
            if index.insert(term, i).is_some() {
                return Err(ModelError::InvalidVocabulary(format!(
                    "duplicate term at {i}"
                )));
            }
        }

        Ok(Self {
            index,
            idf: artifact.idf,
            ngram_min: artifact.ngram_min,
            ngram_max: artifact.ngram_max,
            lowercase: artifact.lowercase,
            sublinear_tf: artifact.sublinear_tf,
            normalize_whitespace: artifact.normalize_whitespace,
            norm: artifact.norm,
        })
    }

    /// Vocabulary size, i.e. the width of the lexical block.
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    fn preprocess(&self, text: &str) -> Vec<char> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        if !self.normalize_whitespace {
            return text.chars().collect();
        }

        let mut chars = Vec::with_capacity(text.len());
        let mut in_space = false;
        for c in text.chars() {
            if c.is_whitespace() {
                if !in_space {
                    chars.push(' ');
                }
                in_space = true;
            } else {
                chars.push(c);
                in_space = false;
            }
        }
        chars
    }

    /// TF-IDF weights of `text`, one per vocabulary term in index order.
    ///
    /// Grams outside the vocabulary are ignored. An input with no known
    /// gram yields an all-zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut values = vec![0.0_f64; self.len()];
        let chars = self.preprocess(text);

        let mut gram = String::new();
        for n in self.ngram_min..=self.ngram_max {
            if chars.len() < n {
                break;
            }
            for window in chars.windows(n) {
                gram.clear();
                gram.extend(window);
                if let Some(&i) = self.index.get(gram.as_str()) {
                    values[i] += 1.0;
                }
            }
        }

        for (value, idf) in values.iter_mut().zip(&self.idf) {
            if *value > 0.0 {
                let tf = if self.sublinear_tf {
                    1.0 + value.ln()
                } else {
                    *value
                };
                *value = tf * idf;
            }
        }

        if self.norm == Norm::L2 {
            let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                values.iter_mut().for_each(|v| *v /= norm);
            }
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(terms: &[&str], idf: &[f64]) -> VectorizerArtifact {
        VectorizerArtifact {
            ngram_min: 1,
            ngram_max: 2,
            lowercase: true,
            sublinear_tf: false,
            normalize_whitespace: true,
            norm: Norm::None,
            terms: terms.iter().map(|t| t.to_string()).collect(),
            idf: idf.to_vec(),
        }
    }

    #[test]
    fn test_transform_counts_unigrams_and_bigrams() {
        let v = TfidfVectorizer::from_artifact(artifact(&["a", "b", "ab"], &[1.0, 2.0, 3.0]))
            .unwrap();
        // "abab": a x2, b x2, ab x2 (ba is unknown)
        assert_eq!(v.transform("abab"), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_transform_lowercases() {
        let v = TfidfVectorizer::from_artifact(artifact(&["a"], &[1.5])).unwrap();
        assert_eq!(v.transform("AAa"), vec![4.5]);
    }

    #[test]
    fn test_transform_keeps_case_when_disabled() {
        let mut a = artifact(&["a"], &[1.0]);
        a.lowercase = false;
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        assert_eq!(v.transform("AAa"), vec![1.0]);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let v = TfidfVectorizer::from_artifact(artifact(&[" "], &[1.0])).unwrap();
        assert_eq!(v.transform("a  \t b"), vec![1.0]);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut a = artifact(&["x"], &[1.0]);
        a.sublinear_tf = true;
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        let out = v.transform("xxx");
        assert!((out[0] - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_l2_norm() {
        let mut a = artifact(&["a", "b"], &[1.0, 1.0]);
        a.norm = Norm::L2;
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        let out = v.transform("aaab");
        let length = (out[0] * out[0] + out[1] * out[1]).sqrt();
        assert!((length - 1.0).abs() < 1e-12);
        assert!((out[0] / out[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_text_is_zero_even_with_l2() {
        let mut a = artifact(&["a"], &[1.0]);
        a.norm = Norm::L2;
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        assert_eq!(v.transform("zzz"), vec![0.0]);
        assert_eq!(v.transform(""), vec![0.0]);
    }

    #[test]
    fn test_rejects_bad_ngram_range() {
        let mut a = artifact(&["a"], &[1.0]);
        a.ngram_min = 3;
        a.ngram_max = 2;
        assert!(matches!(
            TfidfVectorizer::from_artifact(a),
            Err(ModelError::InvalidVocabulary(_))
        ));
    }

    #[test]
    fn test_rejects_zero_ngram_min() {
        let mut a = artifact(&["a"], &[1.0]);
        a.ngram_min = 0;
        assert!(matches!(
            TfidfVectorizer::from_artifact(a),
            Err(ModelError::InvalidVocabulary(_))
        ));
    }

    #[test]
    fn test_rejects_empty_term() {
        let result = TfidfVectorizer::from_artifact(artifact(&["a", ""], &[1.0, 1.0]));
        assert!(matches!(result, Err(ModelError::InvalidVocabulary(_))));
    }

    #[test]
    fn test_sublinear_tf_single_occurrence_is_idf() {
        let mut a = artifact(&["x", "y"], &[2.5, 4.0]);
        a.sublinear_tf = true;
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        assert_eq!(v.transform("xq"), vec![2.5, 0.0]);
    }

    #[test]
    fn test_rejects_duplicate_terms() {
        let result = TfidfVectorizer::from_artifact(artifact(&["a", "a"], &[1.0, 1.0]));
        assert!(matches!(result, Err(ModelError::InvalidVocabulary(_))));
    }

    #[test]
    fn test_rejects_idf_length_mismatch() {
        let result = TfidfVectorizer::from_artifact(artifact(&["a", "b"], &[1.0]));
        assert!(matches!(
            result,
            Err(ModelError::DimensionMismatch { what: "idf", expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_rejects_non_finite_idf() {
        let result = TfidfVectorizer::from_artifact(artifact(&["a"], &[f64::NAN]));
        assert!(matches!(result, Err(ModelError::NonFiniteParameter { .. })));
    }
}
