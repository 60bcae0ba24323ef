//! Implementation of the `faststart list` command.

use faststart_adapters::InMemoryStore;
use faststart_core::application::{TemplateInfo, TemplateService};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let store = InMemoryStore::with_overrides(config.templates.local_path.as_deref())?;
    let templates = TemplateService::new(Box::new(store)).list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Payload templates:")?;
            let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);
            for t in &templates {
                output.print(&table_row(t, width))?;
            }
        }
        // JSON goes straight to stdout so it stays parseable in pipes.
        ListFormat::Json => output.json(&templates)?,
        ListFormat::List => {
            for t in &templates {
                println!("{}", t.name);
            }
        }
        ListFormat::Csv => {
            println!("name,version,source,placeholders");
            for t in &templates {
                println!(
                    "{},{},{},{}",
                    t.name,
                    t.version,
                    source_label(t),
                    t.placeholders.join(" ")
                );
            }
        }
    }

    Ok(())
}

fn table_row(t: &TemplateInfo, width: usize) -> String {
    format!(
        "  {:<width$}  {:<8} {:<8} {}",
        t.name,
        t.version,
        source_label(t),
        t.description
    )
}

fn source_label(t: &TemplateInfo) -> &'static str {
    if t.builtin { "builtin" } else { "override" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(builtin: bool) -> TemplateInfo {
        TemplateInfo {
            id: "auth-api-key@1.0.0".into(),
            name: "auth-api-key".into(),
            version: "1.0.0".into(),
            description: "API key auth".into(),
            builtin,
            placeholders: vec![],
        }
    }

    #[test]
    fn table_row_pads_name_column() {
        let row = table_row(&info(true), 20);
        assert!(row.starts_with("  auth-api-key         1.0.0"));
        assert!(row.contains("builtin"));
        assert!(row.ends_with("API key auth"));
    }

    #[test]
    fn overrides_are_labelled() {
        assert_eq!(source_label(&info(false)), "override");
    }
}
