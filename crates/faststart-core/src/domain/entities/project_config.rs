//! The `ProjectConfig` value object and its typestate builder.
//!
//! A `ProjectConfig` is the complete input of one generation run. It is built
//! once, never mutated, and owned by that run.
//!
//! # Typestate builder
//!
//! `NoName` / `HasName` make the project name mandatory at compile time;
//! every other field has a default (`Api`, no database, no auth, async).
//! `build()` still runs `validate()` for the checks the type system cannot
//! express (blank names, path separators in the name).

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError,
    validation::DomainValidator,
    value_objects::{AuthType, DatabaseFamily, DatabaseType, ProjectType},
};

/// Configuration choices for one scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectConfig {
    name: String,
    path: PathBuf,
    project_type: ProjectType,
    database_type: DatabaseType,
    auth_type: AuthType,
    is_async: bool,
}

impl ProjectConfig {
    pub fn builder() -> ProjectConfigBuilder<NoName> {
        ProjectConfigBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub const fn project_type(&self) -> ProjectType {
        self.project_type
    }
    pub const fn database_type(&self) -> DatabaseType {
        self.database_type
    }
    pub const fn database_family(&self) -> DatabaseFamily {
        self.database_type.family()
    }
    pub const fn auth_type(&self) -> AuthType {
        self.auth_type
    }
    pub const fn is_async(&self) -> bool {
        self.is_async
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        DomainValidator::validate_project_name(&self.name)?;
        if self.path.as_os_str().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "path" });
        }
        Ok(())
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, db={}, auth={}, {})",
            self.name,
            self.project_type,
            self.database_type,
            self.auth_type,
            if self.is_async { "async" } else { "sync" }
        )
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: name has not been set.
pub struct NoName;
/// Marker: name is set; the config can be built.
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

pub struct ProjectConfigBuilder<N> {
    name: Option<String>,
    path: Option<PathBuf>,
    project_type: ProjectType,
    database_type: DatabaseType,
    auth_type: AuthType,
    is_async: bool,
    _marker: PhantomData<N>,
}

impl ProjectConfigBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            name: None,
            path: None,
            project_type: ProjectType::Api,
            database_type: DatabaseType::None,
            auth_type: AuthType::None,
            is_async: true,
            _marker: PhantomData,
        }
    }

    pub fn name(self, name: impl Into<String>) -> ProjectConfigBuilder<HasName> {
        ProjectConfigBuilder {
            name: Some(name.into()),
            path: self.path,
            project_type: self.project_type,
            database_type: self.database_type,
            auth_type: self.auth_type,
            is_async: self.is_async,
            _marker: PhantomData,
        }
    }
}

impl Default for ProjectConfigBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> ProjectConfigBuilder<N> {
    /// Project root. Defaults to the project name relative to the working
    /// directory.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn database(mut self, database_type: DatabaseType) -> Self {
        self.database_type = database_type;
        self
    }

    pub fn auth(mut self, auth_type: AuthType) -> Self {
        self.auth_type = auth_type;
        self
    }

    pub fn is_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }
}

impl ProjectConfigBuilder<HasName> {
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let name = self
            .name
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;
        let path = self.path.unwrap_or_else(|| PathBuf::from(&name));

        let config = ProjectConfig {
            name,
            path,
            project_type: self.project_type,
            database_type: self.database_type,
            auth_type: self.auth_type,
            is_async: self.is_async,
        };
        config.validate()?;
        Ok(config)
    }
}
