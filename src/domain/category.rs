//! Category entity.

use crate::domain::{CategoryId, ValidationError};
use serde::{Deserialize, Serialize};

/// A named grouping that questions may optionally belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Payload for creating or renaming a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Trim the name and reject it if nothing is left.
    pub fn into_validated(self) -> Result<Self, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        Ok(NewCategory {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_trimmed() {
        let c = NewCategory::new("  Драма ").into_validated().unwrap();
        assert_eq!(c.name, "Драма");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            NewCategory::new(" \t").into_validated(),
            Err(ValidationError::EmptyCategoryName)
        );
    }
}
