//! Implementation of the `faststart matrix` command.
//!
//! Prints every `(type, database, auth, mode)` key with the payloads it
//! selects, or the reason it is rejected.

use serde::Serialize;

use faststart_core::domain::{AuthType, Combination, DatabaseType, ProjectType, all_combinations};

use crate::{
    cli::{ListFormat, MatrixArgs},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MatrixRow {
    pub project_type: ProjectType,
    pub database: DatabaseType,
    pub auth: AuthType,
    pub is_async: bool,
    pub templates: Vec<&'static str>,
    pub files: Vec<&'static str>,
    pub error: Option<String>,
}

impl From<Combination> for MatrixRow {
    fn from(c: Combination) -> Self {
        let (templates, files, error) = match c.selection {
            Ok(s) => (s.template_names(), s.output_paths(), None),
            Err(e) => (Vec::new(), Vec::new(), Some(e.to_string())),
        };
        Self {
            project_type: c.project_type,
            database: c.database,
            auth: c.auth,
            is_async: c.is_async,
            templates,
            files,
            error,
        }
    }
}

pub fn execute(args: MatrixArgs, output: OutputManager) -> CliResult<()> {
    let rows = rows(
        args.project_type.map(Into::into),
        args.database.map(Into::into),
        args.auth.map(Into::into),
    );

    match args.format {
        ListFormat::Json => output.json(&rows)?,
        ListFormat::Csv => {
            println!("project_type,database,auth,mode,templates,error");
            for r in &rows {
                println!(
                    "{},{},{},{},{},{}",
                    r.project_type,
                    r.database,
                    r.auth,
                    mode(r.is_async),
                    r.templates.join(" "),
                    r.error.as_deref().unwrap_or("")
                );
            }
        }
        ListFormat::Table | ListFormat::List => {
            output.header(&format!(
                "{:<13} {:<9} {:<8} {:<6} templates",
                "type", "database", "auth", "mode"
            ))?;
            for r in &rows {
                let selected = match &r.error {
                    Some(e) => format!("error: {e}"),
                    None => r.templates.join(", "),
                };
                output.print(&format!(
                    "{:<13} {:<9} {:<8} {:<6} {}",
                    r.project_type.as_str(),
                    r.database.as_str(),
                    r.auth.as_str(),
                    mode(r.is_async),
                    selected
                ))?;
            }
            let rejected = rows.iter().filter(|r| r.error.is_some()).count();
            output.info(&format!(
                "{} combinations, {} unsupported",
                rows.len(),
                rejected
            ))?;
        }
    }

    Ok(())
}

/// Matrix rows matching every given filter.
pub fn rows(
    project_type: Option<ProjectType>,
    database: Option<DatabaseType>,
    auth: Option<AuthType>,
) -> Vec<MatrixRow> {
    all_combinations()
        .into_iter()
        .filter(|c| project_type.is_none_or(|p| p == c.project_type))
        .filter(|c| database.is_none_or(|d| d == c.database))
        .filter(|c| auth.is_none_or(|a| a == c.auth))
        .map(MatrixRow::from)
        .collect()
}

fn mode(is_async: bool) -> &'static str {
    if is_async { "async" } else { "sync" }
}
