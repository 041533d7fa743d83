//! Configuration validation for record-diff.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, DifferConfig, MatchingConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.matching.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for DifferConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(0.0..=1.0).contains(&self.pair_cutoff) {
            errors.push(ConfigError {
                field: "diff.pair_cutoff".to_string(),
                message: format!("must be between 0.0 and 1.0, got {}", self.pair_cutoff),
            });
        }
        if self.max_pairing_len == 0 {
            errors.push(ConfigError {
                field: "diff.max_pairing_len".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        errors
    }
}

impl Validatable for MatchingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.exhaustive_limit == 0 {
            errors.push(ConfigError {
                field: "matching.exhaustive_limit".to_string(),
                message: "must be at least 1".to_string(),
            });
        } else if self.exhaustive_limit > 12 {
            // 13! candidate assignments is already out of reach.
            errors.push(ConfigError {
                field: "matching.exhaustive_limit".to_string(),
                message: format!("must be at most 12, got {}", self.exhaustive_limit),
            });
        }
        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.diff.validate();
        for (field, path) in [("paths.a", &self.paths.a), ("paths.b", &self.paths.b)] {
            if !path.exists() {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: format!("file not found: {}", path.display()),
                });
            }
        }
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
