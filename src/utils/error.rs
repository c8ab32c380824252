use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern in {field}: {source}")]
    PatternError {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Discovery failed: {0}")]
    DiscoveryError(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    FileSystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl PatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PatchError::ReadError { .. }
            | PatchError::WriteError { .. }
            | PatchError::DiscoveryError(_) => ErrorCategory::FileSystem,
            PatchError::PatternError { .. }
            | PatchError::ConfigError { .. }
            | PatchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A failed write can leave the tree half-migrated.
            PatchError::WriteError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PatchError::ReadError { path, .. } => {
                format!("Could not read {}", path.display())
            }
            PatchError::WriteError { path, .. } => {
                format!("Could not write {}; files patched before it keep their changes", path.display())
            }
            PatchError::PatternError { field, .. } => {
                format!("The pattern configured for {} is not a valid regular expression", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PatchError::ReadError { .. } => {
                "Check the file permissions and that the file is UTF-8 encoded"
            }
            PatchError::WriteError { .. } => {
                "Check write permissions, then re-run; already patched files report no changes"
            }
            PatchError::DiscoveryError(_) => {
                "Check that the root and discovery directories exist and are readable"
            }
            PatchError::PatternError { .. } => "Fix the regular expression in the patch profile",
            PatchError::ConfigError { .. } | PatchError::InvalidConfigValueError { .. } => {
                "Review the patch profile TOML file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_is_critical() {
        let err = PatchError::WriteError {
            path: PathBuf::from("app/api/x/route.ts"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::FileSystem);
        assert!(err.to_string().contains("app/api/x/route.ts"));
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = PatchError::ConfigError {
            message: "TOML parsing error".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.recovery_suggestion(), "Review the patch profile TOML file");
    }
}
