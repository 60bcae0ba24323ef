//! Payload catalog: built-ins plus on-disk overrides.
//!
//! The built-in payloads always load. On top of them, the first override
//! directory found replaces payloads by name.
//!
//! # Override resolution order
//!
//! 1. **`$FASTSTART_TEMPLATES_DIR`**
//! 2. **`templates.local_path`** from the config file
//! 3. **`./.faststart/templates`** relative to the working directory
//!
//! Only the first directory that exists is used. A missing directory is not
//! an error; an unreadable one is.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use faststart_core::domain::{DomainError, Template, payloads};

use crate::template_loader::FilesystemTemplateLoader;

pub const TEMPLATES_DIR_ENV: &str = "FASTSTART_TEMPLATES_DIR";
pub const DEFAULT_OVERRIDE_DIR: &str = ".faststart/templates";

/// Built-in payloads overlaid by overrides from the first directory found.
#[instrument(skip_all)]
pub fn all_templates(configured: Option<&Path>) -> Result<Vec<Template>, DomainError> {
    let env_dir = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);
    let builtin = payloads::builtin();

    let Some(dir) = override_dir(&candidate_paths(env_dir, configured)) else {
        debug!("no template override directory found");
        return Ok(builtin);
    };

    let overrides = FilesystemTemplateLoader::new(&dir).load_all()?;
    info!(
        path = %dir.display(),
        count = overrides.len(),
        "template overrides loaded"
    );
    Ok(overlay(builtin, overrides))
}

/// Ordered override candidates.
pub fn candidate_paths(env_dir: Option<PathBuf>, configured: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Some(p) = env_dir {
        debug!(path = %p.display(), "candidate from ${}", TEMPLATES_DIR_ENV);
        paths.push(p);
    }
    if let Some(p) = configured {
        debug!(path = %p.display(), "candidate from config");
        paths.push(p.to_path_buf());
    }
    paths.push(PathBuf::from(DEFAULT_OVERRIDE_DIR));

    paths
}

/// First candidate that is an existing directory.
pub fn override_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_dir()).cloned()
}

/// Replace built-ins by name. Overrides with unknown names are kept but
/// never selected, so they are reported.
pub fn overlay(builtin: Vec<Template>, overrides: Vec<Template>) -> Vec<Template> {
    let mut merged = builtin;
    for template in overrides {
        match merged
            .iter_mut()
            .find(|t| t.id.name() == template.id.name())
        {
            Some(slot) => {
                debug!(from = %slot.id, to = %template.id, "overriding built-in template");
                *slot = template;
            }
            None => {
                warn!(
                    template = %template.id,
                    "override does not match any built-in template name"
                );
                merged.push(template);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use faststart_core::domain::{TemplateId, TemplateSource};
    use tempfile::TempDir;

    fn owned(name: &str, text: &str) -> Template {
        Template::new(
            TemplateId::new(name, "9.0.0"),
            "override",
            TemplateSource::Owned(text.into()),
        )
    }

    #[test]
    fn candidate_order_is_env_then_config_then_default() {
        let paths = candidate_paths(
            Some(PathBuf::from("/env/templates")),
            Some(Path::new("/cfg/templates")),
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/env/templates"),
                PathBuf::from("/cfg/templates"),
                PathBuf::from(DEFAULT_OVERRIDE_DIR),
            ]
        );
        assert_eq!(candidate_paths(None, None), vec![PathBuf::from(DEFAULT_OVERRIDE_DIR)]);
    }

    #[test]
    fn override_dir_skips_missing_candidates() {
        let real = TempDir::new().unwrap();
        let candidates = vec![
            PathBuf::from("/faststart/does/not/exist"),
            real.path().to_path_buf(),
        ];
        assert_eq!(override_dir(&candidates), Some(real.path().to_path_buf()));
        assert_eq!(override_dir(&candidates[..1]), None);
    }

    #[test]
    fn overlay_replaces_by_name_and_keeps_unknown() {
        let builtin = payloads::builtin();
        let count = builtin.len();
        let merged = overlay(
            builtin,
            vec![owned("auth-api-key", "router = 1\n"), owned("extra", "x\n")],
        );
        assert_eq!(merged.len(), count + 1);
        let api_key = merged.iter().find(|t| t.id.name() == "auth-api-key").unwrap();
        assert_eq!(api_key.text(), "router = 1\n");
        assert_eq!(api_key.id.version(), "9.0.0");
    }

    #[test]
    fn configured_directory_overrides_builtin() {
        let temp = TempDir::new().unwrap();
        let slot = temp.path().join("api-key");
        std::fs::create_dir_all(&slot).unwrap();
        std::fs::write(
            slot.join("template.toml"),
            "[template]\nid = \"auth-api-key\"\nversion = \"2.0.0\"\nfile = \"auth.tmpl\"\n",
        )
        .unwrap();
        std::fs::write(slot.join("auth.tmpl"), "router = APIRouter()\n").unwrap();

        // Only meaningful when the env override is not set in this process.
        if std::env::var_os(TEMPLATES_DIR_ENV).is_none() {
            let all = all_templates(Some(temp.path())).unwrap();
            let api_key = all.iter().find(|t| t.id.name() == "auth-api-key").unwrap();
            assert_eq!(api_key.id.version(), "2.0.0");
        }
    }
}
