//! Template Service - payload catalog operations.
//!
//! Separate from rendering: listing, inspecting, and replacing payloads.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ports::TemplateStore,
    domain::{DomainValidator as validator, Template, TemplateId},
    error::FastStartResult,
};

/// Display view of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub builtin: bool,
    pub placeholders: Vec<String>,
}

impl From<&Template> for TemplateInfo {
    fn from(t: &Template) -> Self {
        let mut placeholders = t.placeholders();
        placeholders.sort();
        placeholders.dedup();
        Self {
            id: t.id.to_string(),
            name: t.id.name().to_string(),
            version: t.id.version().to_string(),
            description: t.description.clone(),
            builtin: t.is_builtin(),
            placeholders,
        }
    }
}

/// Service for payload operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Get a payload by name.
    pub fn get(&self, name: &str) -> FastStartResult<Template> {
        self.store.get(name)
    }

    pub fn info(&self, name: &str) -> FastStartResult<TemplateInfo> {
        self.store.get(name).map(|t| TemplateInfo::from(&t))
    }

    /// Validate and insert a payload, replacing any with the same name.
    #[instrument(skip_all, fields(template = %template.id))]
    pub fn save(&self, template: Template) -> FastStartResult<()> {
        validator::validate_template(&template)?;
        debug!("Saving template");
        self.store.insert(template)
    }

    pub fn remove(&self, id: &TemplateId) -> FastStartResult<()> {
        self.store.remove(id)
    }

    /// All payloads, ordered by name.
    pub fn list(&self) -> FastStartResult<Vec<TemplateInfo>> {
        Ok(self.store.list()?.iter().map(TemplateInfo::from).collect())
    }
}
