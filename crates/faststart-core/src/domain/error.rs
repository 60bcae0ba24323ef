// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (selection results are compared in tests)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Invalid project configuration: {0}")]
    InvalidConfig(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("auth '{auth}' has no template for database '{database}': {reason}")]
    UnsupportedCombination {
        auth: String,
        database: String,
        reason: String,
    },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    #[error("Template '{template_id}' references undefined variable '{variable}'")]
    MissingVariable {
        template_id: String,
        variable: String,
    },

    #[error("Template '{template_id}' has an unterminated placeholder at byte {offset}")]
    UnterminatedPlaceholder { template_id: String, offset: usize },

    // ========================================================================
    // Output Structure Errors
    // ========================================================================
    #[error("Duplicate path in output: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfig(msg) => vec![
                "Check your project configuration".into(),
                format!("Details: {}", msg),
            ],
            Self::UnsupportedCombination { auth, .. } => match auth.as_str() {
                "jwt" => vec![
                    "JWT authentication stores users and needs a database".into(),
                    "  • Pick a database: --db postgres | mysql | sqlite | mongodb | redis".into(),
                    "  • Or use --auth oauth2 / --auth api-key without a database".into(),
                    "Try: faststart matrix --auth jwt".into(),
                ],
                _ => vec![
                    "This auth/database combination has no template".into(),
                    "Try: faststart matrix".into(),
                ],
            },
            Self::MissingVariable { template_id, .. }
            | Self::UnterminatedPlaceholder { template_id, .. } => vec![
                format!("Template '{}' is malformed", template_id),
                "If you override templates, check the placeholders in your copy".into(),
                "Otherwise please report this issue".into(),
            ],
            Self::EmptyTemplate { template_id } => vec![
                format!("Template '{}' is corrupted", template_id),
                "Please report this issue or remove the override".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig(_) | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::UnsupportedCombination { .. } => ErrorCategory::Configuration,
            Self::InvalidTemplate(_) | Self::EmptyTemplate { .. } => ErrorCategory::Validation,
            Self::MissingVariable { .. } | Self::UnterminatedPlaceholder { .. } => {
                ErrorCategory::Render
            }
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Render,
    Internal,
}
