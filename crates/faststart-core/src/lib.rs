//! FastStart Core - hexagonal core of the FastAPI scaffolder.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          faststart-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ TemplateSelector, ScaffoldService,      │
//! │ TemplateService                         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports: Filesystem, TemplateStore      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     faststart-adapters (Infrastructure) │
//! └─────────────────────────────────────────┘
//!
//!   Domain: ProjectConfig, decision table, payloads, RenderContext
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use faststart_core::prelude::*;
//!
//! let config = ProjectConfig::builder()
//!     .name("orders")
//!     .database(DatabaseType::Postgres)
//!     .auth(AuthType::Jwt)
//!     .build()?;
//!
//! let selector = TemplateSelector::new(Box::new(store));
//! let structure = selector.render(&config)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        ScaffoldReport, ScaffoldService, TemplateInfo, TemplateSelector, TemplateService,
        WriteMode,
        ports::{Filesystem, TemplateStore},
    };
    pub use crate::domain::{
        AuthType, DatabaseFamily, DatabaseType, ProjectConfig, ProjectStructure, ProjectType,
        RenderContext, Selection, Template, TemplateId, TemplateSource,
    };
    pub use crate::error::{FastStartError, FastStartResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
