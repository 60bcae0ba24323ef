//! Template payloads and the interpolation context.
//!
//! A [`Template`] here is a single named, versioned block of boilerplate text
//! (a *payload*). Payloads are plain data: they carry no selection logic.
//! The decision table picks payload ids, the store hands out the payload
//! text, and [`RenderContext`] performs the one interpolation step.
//!
//! ```text
//! ┌────────────────────┐   TemplateId   ┌───────────────┐
//! │  decision_table    │ ─────────────▶ │ TemplateStore │
//! └────────────────────┘                └───────┬───────┘
//!                                               │ Template (payload text)
//!                                               ▼
//!                                      ┌─────────────────┐
//!                                      │  RenderContext  │  {{VAR}} -> value
//!                                      └─────────────────┘
//! ```
//!
//! ## Placeholder syntax
//!
//! `{{NAME}}` where `NAME` is `[A-Z0-9_]+`. Anything else between double
//! braces is left untouched, so payloads may freely contain Python dict
//! literals and f-strings. Substituted values are never re-scanned.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::DomainError;

// ============================================================================
// Template Identity
// ============================================================================

/// Unique identifier for a payload.
///
/// ## Format
///
/// Human-readable: `name@version` (e.g., `auth-jwt-sql@1.0.0`)
///
/// ## Constraints
///
/// - Name cannot contain `@` (enforced by `assert!` in constructor)
/// - Version follows SemVer in practice, but stored as opaque string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId {
    name: String,
    version: String,
}

impl TemplateId {
    /// Create a new template ID.
    ///
    /// # Panics
    ///
    /// Panics if name contains `@`. This is a programming error (invalid
    /// template name), not a runtime error.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        assert!(
            !name.contains('@'),
            "Template name cannot contain @: {}",
            name
        );
        Self { name, version }
    }

    /// Parse from string format `name@version`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTemplate` if format is wrong (missing `@` or multiple `@`).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = s.split('@').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "Invalid template ID format: {}. Expected 'name@version'",
                s
            )));
        }
        Ok(Self::new(parts[0], parts[1]))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Where the payload text lives.
///
/// Built-in payloads are compile-time strings; overrides loaded from disk
/// own their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s.as_str(),
        }
    }
}

/// A named block of boilerplate text.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `id.name` is non-empty
/// 2. the text is non-empty
/// 3. every `{{` opens a terminated placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub description: String,
    pub source: TemplateSource,
}

impl Template {
    pub fn new(id: TemplateId, description: impl Into<String>, source: TemplateSource) -> Self {
        Self {
            id,
            description: description.into(),
            source,
        }
    }

    /// Built-in payload backed by a `'static` string.
    pub fn builtin(name: &str, description: &str, text: &'static str) -> Self {
        Self::new(
            TemplateId::new(name, crate::domain::payloads::BUILTIN_VERSION),
            description,
            TemplateSource::Static(text),
        )
    }

    pub fn text(&self) -> &str {
        self.source.as_str()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.source, TemplateSource::Static(_))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.text().trim().is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: self.id.to_string(),
            });
        }

        // Scanning with an empty context surfaces malformed placeholders
        // without caring which variables are defined.
        scan_placeholders(self.text())
            .map(|_| ())
            .map_err(|offset| DomainError::UnterminatedPlaceholder {
                template_id: self.id.to_string(),
                offset,
            })
    }

    /// Variable names referenced by this payload, in order of appearance.
    pub fn placeholders(&self) -> Vec<String> {
        scan_placeholders(self.text())
            .map(|parts| {
                parts
                    .into_iter()
                    .filter_map(|p| match p {
                        Part::Var(name) => Some(name.to_string()),
                        Part::Text(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// RenderContext
// ============================================================================

/// Context for payload rendering.
///
/// A **Value Object** holding every variable a payload may reference.
/// Immutable after creation - transformations create new instances (see
/// `with_variable`).
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | "my awesome app" | User input |
/// | `PROJECT_NAME_SNAKE` | "my_awesome_app" | Computed |
/// | `PROJECT_NAME_KEBAB` | "my-awesome-app" | Computed |
/// | `PROJECT_NAME_PASCAL` | "MyAwesomeApp" | Computed |
/// | `PROJECT_NAME_TITLE` | "My Awesome App" | Computed |
///
/// Branch-specific variables (`AWAIT`, `SESSION_TYPE`, ...) are layered on
/// top by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    project_name: String,

    /// `BTreeMap` so debug output and `variables()` are ordered.
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    /// Create a new render context with automatic variable derivation.
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut vars = BTreeMap::new();

        vars.insert("PROJECT_NAME".to_string(), name.clone());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(&name));
        vars.insert("PROJECT_NAME_KEBAB".to_string(), to_kebab_case(&name));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(&name));
        vars.insert("PROJECT_NAME_TITLE".to_string(), to_title_case(&name));

        Self {
            project_name: name,
            variables: vars,
        }
    }

    /// Add a variable, consuming self and returning a new context.
    ///
    /// ```rust,ignore
    /// let ctx = RenderContext::new("MyApp")
    ///     .with_variable("AWAIT", "await ")
    ///     .with_variable("SESSION_TYPE", "AsyncSession");
    /// ```
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_variables<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        vars.into_iter()
            .fold(self, |ctx, (k, v)| ctx.with_variable(k, v))
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get a variable value if it exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render a payload, failing on any placeholder this context cannot fill.
    ///
    /// # Errors
    ///
    /// - `MissingVariable` for `{{NAME}}` with no value in the context
    /// - `UnterminatedPlaceholder` for a `{{NAME` with no closing braces
    pub fn render(&self, template: &Template) -> Result<String, DomainError> {
        self.render_str(&template.id.to_string(), template.text())
    }

    /// Same as [`render`](Self::render) for a raw string; `label` names the
    /// source in errors.
    pub fn render_str(&self, label: &str, text: &str) -> Result<String, DomainError> {
        let parts = scan_placeholders(text).map_err(|offset| {
            DomainError::UnterminatedPlaceholder {
                template_id: label.to_string(),
                offset,
            }
        })?;

        let mut out = String::with_capacity(text.len());
        for part in parts {
            match part {
                Part::Text(t) => out.push_str(t),
                Part::Var(name) => {
                    let value = self.get(name).ok_or_else(|| DomainError::MissingVariable {
                        template_id: label.to_string(),
                        variable: name.to_string(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

// ============================================================================
// Placeholder Scanner
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Part<'a> {
    Text(&'a str),
    Var(&'a str),
}

/// Split `text` into literal runs and `{{NAME}}` placeholders.
///
/// Single linear pass. `{{` followed by something that is not a variable
/// name (e.g. `{{"sub": ...}}` or a lone `{{`) is kept as literal text; a
/// variable name not closed by `}}` is an error at the returned byte
/// offset.
fn scan_placeholders(text: &str) -> Result<Vec<Part<'_>>, usize> {
    let mut parts = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;
    let bytes = text.as_bytes();

    while let Some(rel) = text[cursor..].find("{{") {
        let open = cursor + rel;
        let name_start = open + 2;
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || **b == b'_')
            .count();

        if name_len == 0 {
            cursor = name_start;
            continue;
        }

        let name_end = name_start + name_len;
        if !text[name_end..].starts_with("}}") {
            return Err(open);
        }

        if literal_start < open {
            parts.push(Part::Text(&text[literal_start..open]));
        }
        parts.push(Part::Var(&text[name_start..name_end]));
        cursor = name_end + 2;
        literal_start = cursor;
    }

    if literal_start < text.len() {
        parts.push(Part::Text(&text[literal_start..]));
    }
    Ok(parts)
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "my-app" | "my_app" |
/// | "HTTPRequest" | "http_request" |
fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert a string to kebab-case.
fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to PascalCase.
fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to a human-readable Title Case display name.
///
/// "my-awesome_app" → "My Awesome App"
fn to_title_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            // to_uppercase handles Unicode correctly (e.g., "ß" -> "SS")
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, `.`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // "myApp" → "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(text: &'static str) -> Template {
        Template::new(
            TemplateId::new("t", "1.0.0"),
            "test",
            TemplateSource::Static(text),
        )
    }

    #[test]
    fn template_id_parsing() {
        let id = TemplateId::parse("auth-jwt-sql@2.0.0").unwrap();
        assert_eq!(id.name(), "auth-jwt-sql");
        assert_eq!(id.version(), "2.0.0");
        assert_eq!(id.to_string(), "auth-jwt-sql@2.0.0");

        assert!(TemplateId::parse("invalid").is_err());
        assert!(TemplateId::parse("too@many@ats").is_err());
        assert!(TemplateId::parse("@1.0.0").is_err());
    }

    #[test]
    #[should_panic]
    fn template_id_rejects_at_in_name() {
        TemplateId::new("invalid@name", "1.0.0");
    }

    #[test]
    fn render_context_standard_variables() {
        let ctx = RenderContext::new("my awesome project");

        assert_eq!(ctx.get("PROJECT_NAME"), Some("my awesome project"));
        assert_eq!(ctx.get("PROJECT_NAME_SNAKE"), Some("my_awesome_project"));
        assert_eq!(ctx.get("PROJECT_NAME_KEBAB"), Some("my-awesome-project"));
        assert_eq!(ctx.get("PROJECT_NAME_PASCAL"), Some("MyAwesomeProject"));
        assert_eq!(ctx.get("PROJECT_NAME_TITLE"), Some("My Awesome Project"));
    }

    #[test]
    fn case_helpers_handle_acronyms() {
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_pascal_case("my-app"), "MyApp");
        assert_eq!(to_title_case("fast_api.service"), "Fast Api Service");
    }

    #[test]
    fn render_substitutes_variables() {
        let ctx = RenderContext::new("shop").with_variable("AWAIT", "await ");
        let out = ctx
            .render(&payload("user = {{AWAIT}}load()  # {{PROJECT_NAME}}"))
            .unwrap();
        assert_eq!(out, "user = await load()  # shop");
    }

    #[test]
    fn render_leaves_python_braces_alone() {
        let ctx = RenderContext::new("shop");
        let text = r#"return {"message": f"{{x}}", "nested": {{"a": 1}}}"#;
        assert_eq!(ctx.render(&payload(text)).unwrap(), text);
    }

    #[test]
    fn render_does_not_rescan_substituted_values() {
        let ctx = RenderContext::new("{{PROJECT_NAME}}");
        assert_eq!(
            ctx.render(&payload("{{PROJECT_NAME}}")).unwrap(),
            "{{PROJECT_NAME}}"
        );
    }

    #[test]
    fn render_fails_on_unknown_variable() {
        let ctx = RenderContext::new("shop");
        let err = ctx.render(&payload("{{NOT_DEFINED}}")).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingVariable {
                template_id: "t@1.0.0".into(),
                variable: "NOT_DEFINED".into(),
            }
        );
    }

    #[test]
    fn render_fails_on_unterminated_placeholder() {
        let ctx = RenderContext::new("shop");
        assert!(matches!(
            ctx.render(&payload("name = {{PROJECT_NAME")),
            Err(DomainError::UnterminatedPlaceholder { offset: 7, .. })
        ));
    }

    #[test]
    fn render_fails_on_single_closing_brace() {
        let ctx = RenderContext::new("shop");
        assert!(matches!(
            ctx.render(&payload("# {{PROJECT_NAME}\nfrom .endpoints import router\n")),
            Err(DomainError::UnterminatedPlaceholder { offset: 2, .. })
        ));
        assert!(payload("x = {{AWAIT load()").validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_payload() {
        assert!(matches!(
            payload("   \n").validate(),
            Err(DomainError::EmptyTemplate { .. })
        ));
    }

    #[test]
    fn placeholders_lists_variables_in_order() {
        let t = payload("{{A}} x {{B_2}} {{\"k\": 1}} {{A}}");
        assert_eq!(t.placeholders(), vec!["A", "B_2", "A"]);
    }
}
