//! Application services - orchestrate use cases.

pub mod render_service;
pub mod scaffold_service;
pub mod template_service;

pub use render_service::TemplateSelector;
pub use scaffold_service::{ScaffoldReport, ScaffoldService, WriteMode};
pub use template_service::{TemplateInfo, TemplateService};

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;
    use std::sync::{Arc, RwLock};

    use crate::{
        application::{ApplicationError, ports::TemplateStore},
        domain::{Template, TemplateId, payloads},
        error::FastStartResult,
    };

    /// Minimal store seeded with the built-in payloads.
    #[derive(Clone, Default)]
    pub struct BuiltinStore(Arc<RwLock<BTreeMap<String, Template>>>);

    impl BuiltinStore {
        pub fn new() -> Self {
            let map = payloads::builtin()
                .into_iter()
                .map(|t| (t.id.name().to_string(), t))
                .collect();
            Self(Arc::new(RwLock::new(map)))
        }
    }

    impl TemplateStore for BuiltinStore {
        fn get(&self, name: &str) -> FastStartResult<Template> {
            let map = self.0.read().map_err(|_| ApplicationError::StoreLockError)?;
            map.get(name).cloned().ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                }
                .into()
            })
        }

        fn list(&self) -> FastStartResult<Vec<Template>> {
            let map = self.0.read().map_err(|_| ApplicationError::StoreLockError)?;
            Ok(map.values().cloned().collect())
        }

        fn insert(&self, template: Template) -> FastStartResult<()> {
            let mut map = self.0.write().map_err(|_| ApplicationError::StoreLockError)?;
            map.insert(template.id.name().to_string(), template);
            Ok(())
        }

        fn remove(&self, id: &TemplateId) -> FastStartResult<()> {
            let mut map = self.0.write().map_err(|_| ApplicationError::StoreLockError)?;
            map.remove(id.name());
            Ok(())
        }
    }
}
