use crate::utils::error::{PatchError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Compiles `pattern`, tagging any failure with the config field it came from.
pub fn compile_pattern(field_name: &str, pattern: &str) -> Result<Regex> {
    validate_non_empty_string(field_name, pattern)?;
    Regex::new(pattern).map_err(|source| PatchError::PatternError {
        field: field_name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("files", "app/api/x/route.ts").is_ok());
        assert!(validate_path("files", "").is_err());
        assert!(validate_path("files", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("handler.accessor", "params.id").is_ok());
        assert!(validate_non_empty_string("handler.accessor", "   ").is_err());
    }

    #[test]
    fn test_compile_pattern() {
        assert!(compile_pattern("handler.anchor", r"try \{\s+").is_ok());

        let err = compile_pattern("handler.anchor", r"try \{(").unwrap_err();
        assert!(matches!(err, PatchError::PatternError { ref field, .. } if field == "handler.anchor"));
    }
}
