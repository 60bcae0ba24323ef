//! Core domain layer for FastStart.
//!
//! Pure logic, no I/O: configuration values, the decision table that maps a
//! configuration to payload choices, the built-in payload texts, and the
//! render context that interpolates them. Rendering and writing are
//! orchestrated by the application layer.

pub mod decision_table;
pub mod entities;
pub mod error;
pub mod payloads;
pub mod value_objects;

mod validation;

pub use decision_table::{
    AUTH_PATH, AuthBranch, Combination, DatabaseImports, ENDPOINTS_PATH, ProjectEndpoints,
    ROUTER_PATH, RouterAssembly, Selection, all_combinations,
};
pub use entities::{
    ProjectConfig, ProjectConfigBuilder, ProjectStructure, RenderContext, RenderedFile, Template,
    TemplateId, TemplateSource,
    common::RelativePath,
    project_config::{HasName, NoName},
};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
pub use value_objects::{AuthType, DatabaseFamily, DatabaseType, ProjectType};
