//! In-memory payload store.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock},
};

use faststart_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId, payloads},
    error::FastStartResult,
};
use tracing::debug;

use crate::builtin_templates;

/// Thread-safe in-memory store keyed by payload name. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, Template>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the built-in payloads only.
    pub fn with_builtin() -> FastStartResult<Self> {
        let store = Self::new();
        for template in payloads::builtin() {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Built-ins overlaid by the first override directory found.
    ///
    /// `configured` is the `templates.local_path` config value, if any.
    pub fn with_overrides(configured: Option<&Path>) -> FastStartResult<Self> {
        let store = Self::new();
        for template in builtin_templates::all_templates(configured)? {
            store.insert(template)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, name: &str) -> FastStartResult<Template> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> FastStartResult<Vec<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, template: Template) -> FastStartResult<()> {
        validator::validate_template(&template)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if let Some(previous) = inner.insert(template.id.name().to_string(), template) {
            debug!(replaced = %previous.id, "Template replaced");
        }
        Ok(())
    }

    fn remove(&self, id: &TemplateId) -> FastStartResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        match inner.get(id.name()) {
            Some(existing) if existing.id == *id => {
                inner.remove(id.name());
                Ok(())
            }
            _ => Err(ApplicationError::TemplateNotFound {
                name: id.to_string(),
            }
            .into()),
        }
    }
}
