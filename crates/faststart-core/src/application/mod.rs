//! Application layer for FastStart.
//!
//! - **Services**: use case orchestration (`TemplateSelector`,
//!   `ScaffoldService`, `TemplateService`)
//! - **Ports**: traits the adapters implement
//! - **Errors**: application-specific error types
//!
//! No selection rules live here; those are in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ScaffoldReport, ScaffoldService, TemplateInfo, TemplateSelector, TemplateService, WriteMode,
};

pub use ports::{Filesystem, TemplateStore};

pub use error::ApplicationError;
