pub mod common;
pub mod project_config;
pub mod project_structure;
pub mod template;

pub use crate::domain::DomainError;
pub use project_config::{ProjectConfig, ProjectConfigBuilder};
pub use project_structure::{ProjectStructure, RenderedFile};
pub use template::{RenderContext, Template, TemplateId, TemplateSource};
