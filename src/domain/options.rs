//! Answer options and their persisted encoding.
//!
//! Options are stored as a JSON array in a single text column. Decoding
//! accepts any valid JSON array of strings, including `\uXXXX`-escaped rows
//! written by other tools.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered multiple-choice options of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerOptions(Vec<String>);

impl AnswerOptions {
    pub fn new(options: Vec<String>) -> Self {
        AnswerOptions(options)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, option: &str) -> bool {
        self.0.iter().any(|o| o == option)
    }

    /// Check the option-set invariants: at least two entries, none blank,
    /// no duplicates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.len() < 2 {
            return Err(ValidationError::TooFewOptions(self.0.len()));
        }

        let mut seen = HashSet::with_capacity(self.0.len());
        for option in &self.0 {
            if option.trim().is_empty() {
                return Err(ValidationError::EmptyOption);
            }
            if !seen.insert(option.as_str()) {
                return Err(ValidationError::DuplicateOption(option.clone()));
            }
        }
        Ok(())
    }

    /// Encode for the `options_json` column.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Decode an `options_json` column value.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<String>>(raw).map(AnswerOptions)
    }
}

impl From<Vec<String>> for AnswerOptions {
    fn from(options: Vec<String>) -> Self {
        AnswerOptions(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> AnswerOptions {
        AnswerOptions::new(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_encode_decode_preserves_order() {
        let options = opts(&["Форрест Гамп", "Зелёная миля", "Одержимость", "1+1"]);
        let encoded = options.encode().unwrap();
        assert_eq!(AnswerOptions::decode(&encoded).unwrap(), options);
    }

    #[test]
    fn test_encode_handles_quotes_and_commas() {
        let options = opts(&["Crouching Tiger, Hidden Dragon", "\"Heat\"", "a\\b", "[x]"]);
        let encoded = options.encode().unwrap();
        assert_eq!(AnswerOptions::decode(&encoded).unwrap(), options);
    }

    #[test]
    fn test_decode_accepts_escaped_unicode() {
        let raw = r#"["\u041c\u0430\u0442\u0440\u0438\u0446\u0430", "\u0414\u044e\u043d\u0430"]"#;
        let decoded = AnswerOptions::decode(raw).unwrap();
        assert_eq!(decoded, opts(&["Матрица", "Дюна"]));
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(AnswerOptions::decode("Матрица").is_err());
        assert!(AnswerOptions::decode(r#"{"a": 1}"#).is_err());
        assert!(AnswerOptions::decode("[1, 2]").is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_options() {
        assert!(opts(&["Матрица", "Начало", "Терминатор", "Дюна"]).validate().is_ok());
        assert!(opts(&["a", "b"]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_too_few() {
        assert_eq!(
            opts(&["only"]).validate(),
            Err(ValidationError::TooFewOptions(1))
        );
        assert_eq!(opts(&[]).validate(), Err(ValidationError::TooFewOptions(0)));
    }

    #[test]
    fn test_validate_rejects_blank_and_duplicate() {
        assert_eq!(
            opts(&["a", "  "]).validate(),
            Err(ValidationError::EmptyOption)
        );
        assert_eq!(
            opts(&["a", "b", "a"]).validate(),
            Err(ValidationError::DuplicateOption("a".to_string()))
        );
    }

    #[test]
    fn test_options_serialize_as_array() {
        let json = serde_json::to_string(&opts(&["x", "y"])).unwrap();
        assert_eq!(json, r#"["x","y"]"#);
    }
}
