use crate::domain::{
    entities::{ProjectConfig, ProjectStructure, Template},
    error::DomainError,
};

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    /// Project names become directory names and Python identifiers, so they
    /// must be non-blank and free of path separators.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if name.contains(['/', '\\']) {
            return Err(DomainError::InvalidConfig(format!(
                "project name '{name}' must not contain path separators"
            )));
        }
        if name.contains('"') {
            return Err(DomainError::InvalidConfig(format!(
                "project name '{name}' must not contain '\"'"
            )));
        }
        if name.starts_with('.') {
            return Err(DomainError::InvalidConfig(format!(
                "project name '{name}' must not start with '.'"
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(DomainError::InvalidConfig(
                "project name contains control characters".into(),
            ));
        }
        Ok(())
    }

    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
