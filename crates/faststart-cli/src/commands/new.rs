//! Implementation of the `faststart new` command.
//!
//! Responsibility: merge CLI arguments with config defaults into a
//! `ProjectConfig`, call the core scaffold service, and display results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use faststart_adapters::{InMemoryStore, LocalFilesystem};
use faststart_core::{
    application::{ScaffoldService, TemplateSelector, WriteMode},
    domain::ProjectConfig,
};

use crate::{
    cli::NewArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `faststart new` command.
///
/// 1. Split NAME into project name and target directory
/// 2. Merge flags over config defaults and validate
/// 3. Confirm with the user unless `--yes`, `--quiet` or `--dry-run`
/// 4. Dry run: preview and print, write nothing
/// 5. Scaffold through `ScaffoldService`
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (project_name, project_path) = resolve_project_path(&args.name)?;
    let project = build_config(&args, &config, &project_name, &project_path)?;
    debug!(config = %project, "Project configuration resolved");

    let store = InMemoryStore::with_overrides(config.templates.local_path.as_deref())?;
    let service = ScaffoldService::new(
        TemplateSelector::new(Box::new(store)),
        Box::new(LocalFilesystem::new()),
    );

    if args.dry_run {
        return preview(&service, &project, &output);
    }

    if !output.is_quiet() && !args.yes && !output.is_json() {
        show_configuration(&project, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let mode = if args.force {
        WriteMode::Overwrite
    } else {
        WriteMode::CreateNew
    };

    if !output.is_json() {
        output.header(&format!("Creating '{project_name}'..."))?;
    }
    let report = service.scaffold(&project, mode)?;
    info!(run_id = %report.run_id, files = report.files.len(), "Scaffold completed");

    if output.is_json() {
        let files: Vec<String> = report
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        return Ok(output.json(&serde_json::json!({
            "root": report.root.display().to_string(),
            "files": files,
        }))?);
    }

    for file in &report.files {
        output.print(&format!("  {}", file.display()))?;
    }
    output.success(&format!(
        "Project '{project_name}' created at {}",
        report.root.display()
    ))?;

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.root.display()))?;
        output.print("  # mount the generated router in your FastAPI app:")?;
        output.print("  from app.api.v1 import router")?;
        output.print("  app.include_router(router, prefix=\"/api/v1\")")?;
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// `orders` → (`orders`, `./orders`); `../svc/orders` → (`orders`, `../svc/orders`).
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract a directory name".into(),
        })?
        .to_string();

    let target_path = if path.components().count() == 1 {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    };

    Ok((project_name, target_path))
}

// ── Config construction ───────────────────────────────────────────────────────

/// Flags win over config defaults. Validation happens in the core builder.
fn build_config(
    args: &NewArgs,
    config: &AppConfig,
    name: &str,
    path: &Path,
) -> CliResult<ProjectConfig> {
    let defaults = &config.defaults;
    ProjectConfig::builder()
        .name(name)
        .path(path)
        .project_type(args.project_type.map_or(defaults.project_type, Into::into))
        .database(args.database.map_or(defaults.database, Into::into))
        .auth(args.auth.map_or(defaults.auth, Into::into))
        .is_async(!args.sync && defaults.is_async)
        .build()
        .map_err(|e| CliError::Core(e.into()))
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn preview(
    service: &ScaffoldService,
    project: &ProjectConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let structure = service.preview(project)?;

    if output.is_json() {
        let files: BTreeMap<String, String> = structure
            .files()
            .map(|f| (f.path.to_string(), f.content.to_string()))
            .collect();
        return Ok(output.json(&files)?);
    }

    output.info(&format!(
        "Dry run: would create '{}' at {}",
        project.name(),
        structure.root().display(),
    ))?;
    for file in structure.files() {
        output.print(&format!("  {} ({} bytes)", file.path, file.size()))?;
    }
    Ok(())
}

fn show_configuration(project: &ProjectConfig, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:   {}", project.name()))?;
    out.print(&format!("  Type:      {}", project.project_type()))?;
    out.print(&format!(
        "  Database:  {}",
        project.database_type().display_name()
    ))?;
    out.print(&format!("  Auth:      {}", project.auth_type()))?;
    out.print(&format!(
        "  Mode:      {}",
        if project.is_async() { "async" } else { "sync" }
    ))?;
    out.print(&format!("  Location:  {}", project.path().display()))?;
    out.print("")?;
    Ok(())
}

/// Ask before writing. Non-interactive stdin counts as consent.
#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        debug!("stdin is not a terminal, skipping confirmation");
        return Ok(true);
    }

    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
