//! Identifier validation for database, table, and field names

use crate::error::{DbError, Result};

/// Check whether a name is a valid identifier.
///
/// A name is valid iff every character is an ASCII letter, digit, or
/// underscore.
pub fn validate_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a name, raising `DbError::InvalidName` on failure.
pub(crate) fn check_name(name: &str) -> Result<()> {
    if validate_name(name) {
        Ok(())
    } else {
        Err(DbError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("books"));
        assert!(validate_name("library_2024"));
        assert!(validate_name("ID"));
        assert!(validate_name("_private"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!validate_name("my-table"));
        assert!(!validate_name("books!"));
        assert!(!validate_name("two words"));
        assert!(!validate_name("café"));
        assert!(!validate_name("a.b"));
    }

    #[test]
    fn test_check_name_error() {
        assert!(check_name("ok_name").is_ok());
        let err = check_name("bad-name").unwrap_err();
        assert!(matches!(err, DbError::InvalidName(n) if n == "bad-name"));
    }
}
