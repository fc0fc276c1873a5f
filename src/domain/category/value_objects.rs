use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "category id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CategoryId> for i64 {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

/// Category name, normalised to trimmed lowercase so lookups are insensitive
/// to case and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_lowercase();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "category name cannot be empty".into(),
            ));
        }
        if value.len() > 100 {
            return Err(DomainError::Validation(
                "category name cannot exceed 100 characters".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlug(String);

impl CategorySlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "category slug cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CategorySlug> for String {
    fn from(value: CategorySlug) -> Self {
        value.0
    }
}

/// Display color in `#RGB` or `#RRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let digits = value.strip_prefix('#').ok_or_else(|| {
            DomainError::Validation("color must start with '#'".into())
        })?;
        let valid_len = digits.len() == 3 || digits.len() == 6;
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::Validation(format!(
                "'{value}' is not a valid hex color"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_normalises_case_and_whitespace() {
        let a = CategoryName::new("  Travel ").unwrap();
        let b = CategoryName::new("travel").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "travel");
    }

    #[test]
    fn name_length_capped() {
        assert!(CategoryName::new("x".repeat(101)).is_err());
        assert!(CategoryName::new("x".repeat(100)).is_ok());
    }

    #[test]
    fn hex_color_accepts_short_and_long_forms() {
        assert!(HexColor::new("#fff").is_ok());
        assert!(HexColor::new("#A1B2C3").is_ok());
        assert!(HexColor::new("fff").is_err());
        assert!(HexColor::new("#ffff").is_err());
        assert!(HexColor::new("#ggg").is_err());
    }
}
