//! Template Selector: configuration in, rendered files out.
//!
//! 1. Ask the decision table for a [`Selection`]
//! 2. Render the fragments (imports, project routes)
//! 3. Splice them into the endpoints base, render auth and router payloads
//!
//! Pure with respect to the filesystem: it only reads payloads from the
//! store and returns a [`ProjectStructure`].

use tracing::{debug, info, instrument};

use crate::{
    application::ports::TemplateStore,
    domain::{
        AUTH_PATH, DomainValidator as validator, ENDPOINTS_PATH, ProjectConfig, ProjectStructure,
        ROUTER_PATH, RenderContext, Selection,
        decision_table::{AUTH_IMPORTS, ENDPOINTS_BASE},
    },
    error::FastStartResult,
};

pub struct TemplateSelector {
    store: Box<dyn TemplateStore>,
}

impl TemplateSelector {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Render every file for `config`.
    ///
    /// No partial output: any unsupported combination or unresolved
    /// placeholder fails the whole render.
    #[instrument(
        skip_all,
        fields(
            project = %config.name(),
            project_type = %config.project_type(),
            database = %config.database_type(),
            auth = %config.auth_type(),
            is_async = config.is_async(),
        )
    )]
    pub fn render(&self, config: &ProjectConfig) -> FastStartResult<ProjectStructure> {
        validator::validate_config(config)?;

        let selection = Selection::for_config(config)?;
        debug!(templates = ?selection.template_names(), "Selection resolved");

        let base = RenderContext::new(config.name())
            .with_variable("CURRENT_USER_TYPE", selection.current_user_type);

        let auth_imports = match selection.auth {
            Some(_) => self.render_payload(AUTH_IMPORTS, &base)?,
            None => String::new(),
        };
        let database_imports = self.render_optional(selection.database_imports.template_name(), &base)?;
        let project_endpoints =
            self.render_optional(selection.project_endpoints.template_name(), &base)?;

        let endpoints_ctx = base
            .clone()
            .with_variable("AUTH_IMPORTS", auth_imports)
            .with_variable("DATABASE_IMPORTS", database_imports)
            .with_variable("PROJECT_ENDPOINTS", project_endpoints);

        let mut structure = ProjectStructure::new(config.path());
        structure.add_file(
            ENDPOINTS_PATH,
            self.render_payload(ENDPOINTS_BASE, &endpoints_ctx)?,
        )?;

        if let Some(auth) = selection.auth {
            let auth_ctx = base.clone().with_variables(auth.variables());
            structure.add_file(AUTH_PATH, self.render_payload(auth.template_name(), &auth_ctx)?)?;
        }

        structure.add_file(
            ROUTER_PATH,
            self.render_payload(selection.router.template_name(), &base)?,
        )?;

        validator::validate_project_structure(&structure)?;
        info!(files = structure.file_count(), "Project rendered");
        Ok(structure)
    }

    fn render_payload(&self, name: &str, ctx: &RenderContext) -> FastStartResult<String> {
        let template = self.store.get(name)?;
        Ok(ctx.render(&template)?)
    }

    fn render_optional(&self, name: Option<&str>, ctx: &RenderContext) -> FastStartResult<String> {
        name.map_or_else(|| Ok(String::new()), |n| self.render_payload(n, ctx))
    }
}
