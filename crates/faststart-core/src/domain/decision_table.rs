//! Payload selection as data.
//!
//! Every rule deciding which boilerplate a configuration gets lives here, as
//! one exhaustive `match` over `(AuthType, DatabaseFamily, is_async)`.
//! The result is a [`Selection`]: a plain description of which payloads to
//! render and which branch variables to feed them. Nothing in this module
//! touches payload text.
//!
//! | auth    | family       | async | auth branch            |
//! |---------|--------------|-------|------------------------|
//! | none    | *            | *     | (no auth file)         |
//! | jwt     | relational   | *     | `JwtSql`               |
//! | jwt     | key-value    | *     | `JwtKeyValue`          |
//! | jwt     | document     | *     | `JwtDocument`          |
//! | jwt     | none         | *     | error                  |
//! | oauth2  | relational   | *     | `OAuth2Sql`            |
//! | oauth2  | other        | *     | `OAuth2Simple`         |
//! | api-key | *            | *     | `ApiKey`               |

use std::fmt;

use crate::domain::{
    entities::ProjectConfig,
    error::DomainError,
    value_objects::{AuthType, DatabaseFamily, DatabaseType, ProjectType},
};

/// Main endpoints file, always emitted.
pub const ENDPOINTS_PATH: &str = "app/api/v1/endpoints.py";
/// Auth endpoints file, emitted only when auth is enabled.
pub const AUTH_PATH: &str = "app/api/v1/auth.py";
/// Router aggregator, always emitted.
pub const ROUTER_PATH: &str = "app/api/v1/__init__.py";

/// Base payload the endpoints file is assembled on.
pub const ENDPOINTS_BASE: &str = "endpoints-base";
/// Fragment injected as `AUTH_IMPORTS` whenever auth is enabled.
pub const AUTH_IMPORTS: &str = "imports-auth";

/// Variables a branch contributes to the render context.
pub type BranchVariables = Vec<(&'static str, &'static str)>;

// ── Auth ─────────────────────────────────────────────────────────────────────

/// Which auth endpoints payload to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthBranch {
    /// JWT over a SQL session.
    JwtSql { is_async: bool },
    /// JWT with a cache-backed user store; register/update are stubs.
    JwtKeyValue { is_async: bool },
    /// JWT with a document store; register/update are stubs.
    JwtDocument { is_async: bool },
    /// OAuth2 password flow with a DB dependency.
    OAuth2Sql { is_async: bool },
    /// OAuth2 on a dict user, plus a logout stub.
    OAuth2Simple,
    /// Single `verify` endpoint.
    ApiKey,
}

impl AuthBranch {
    pub const fn template_name(&self) -> &'static str {
        match self {
            Self::JwtSql { .. } => "auth-jwt-sql",
            Self::JwtKeyValue { .. } => "auth-jwt-keyvalue",
            Self::JwtDocument { .. } => "auth-jwt-document",
            Self::OAuth2Sql { .. } => "auth-oauth2-sql",
            Self::OAuth2Simple => "auth-oauth2-simple",
            Self::ApiKey => "auth-api-key",
        }
    }

    pub fn variables(&self) -> BranchVariables {
        match *self {
            Self::JwtSql { is_async } | Self::OAuth2Sql { is_async } => session_variables(is_async),
            Self::JwtKeyValue { is_async } | Self::JwtDocument { is_async } => vec![
                ("AWAIT", if is_async { "await " } else { "" }),
                ("ASYNC", if is_async { "async " } else { "" }),
            ],
            Self::OAuth2Simple | Self::ApiKey => Vec::new(),
        }
    }
}

impl fmt::Display for AuthBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())?;
        match self {
            Self::JwtSql { is_async }
            | Self::JwtKeyValue { is_async }
            | Self::JwtDocument { is_async }
            | Self::OAuth2Sql { is_async } => {
                write!(f, " ({})", if *is_async { "async" } else { "sync" })
            }
            Self::OAuth2Simple | Self::ApiKey => Ok(()),
        }
    }
}

fn session_variables(is_async: bool) -> BranchVariables {
    if is_async {
        vec![
            (
                "SESSION_IMPORT",
                "from sqlalchemy.ext.asyncio import AsyncSession",
            ),
            ("SESSION_TYPE", "AsyncSession"),
            ("AWAIT", "await "),
        ]
    } else {
        vec![
            ("SESSION_IMPORT", "from sqlalchemy.orm import Session"),
            ("SESSION_TYPE", "Session"),
            ("AWAIT", ""),
        ]
    }
}

// ── Database imports ─────────────────────────────────────────────────────────

/// Database imports injected into the endpoints file. Only JWT gets any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseImports {
    None,
    SqlAsync,
    SqlSync,
    KeyValue,
    Document,
}

impl DatabaseImports {
    pub const fn template_name(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::SqlAsync => Some("imports-db-sql-async"),
            Self::SqlSync => Some("imports-db-sql-sync"),
            Self::KeyValue => Some("imports-db-keyvalue"),
            Self::Document => Some("imports-db-document"),
        }
    }
}

// ── Project endpoints ────────────────────────────────────────────────────────

/// Extra routes appended to the endpoints file for the project type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectEndpoints {
    None,
    /// `POST /predict` and `GET /model/info`.
    MlApi,
    /// `GET /status` and `POST /process`. `authenticated` adds the
    /// `current_user` dependency to `process`.
    Microservice { authenticated: bool },
}

impl ProjectEndpoints {
    pub const fn template_name(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::MlApi => Some("endpoints-ml"),
            Self::Microservice {
                authenticated: false,
            } => Some("endpoints-microservice"),
            Self::Microservice {
                authenticated: true,
            } => Some("endpoints-microservice-auth"),
        }
    }
}

// ── Router ───────────────────────────────────────────────────────────────────

/// Shape of `app/api/v1/__init__.py`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterAssembly {
    /// Include the root router and mount auth under `/auth`.
    WithAuth,
    /// Re-export the root router.
    RootOnly,
}

impl RouterAssembly {
    pub const fn template_name(&self) -> &'static str {
        match self {
            Self::WithAuth => "router-with-auth",
            Self::RootOnly => "router-root-only",
        }
    }
}

// ── Selection ────────────────────────────────────────────────────────────────

/// Every payload choice for one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub auth: Option<AuthBranch>,
    pub database_imports: DatabaseImports,
    pub project_endpoints: ProjectEndpoints,
    pub router: RouterAssembly,
    /// Type annotation of `current_user` in authenticated project routes.
    pub current_user_type: &'static str,
}

impl Selection {
    pub fn for_config(config: &ProjectConfig) -> Result<Self, DomainError> {
        Self::for_choices(
            config.project_type(),
            config.database_type(),
            config.auth_type(),
            config.is_async(),
        )
    }

    pub fn for_choices(
        project_type: ProjectType,
        database: DatabaseType,
        auth_type: AuthType,
        is_async: bool,
    ) -> Result<Self, DomainError> {
        use DatabaseFamily as F;

        let family = database.family();

        let auth = match (auth_type, family, is_async) {
            (AuthType::None, _, _) => None,

            (AuthType::Jwt, F::Relational, is_async) => Some(AuthBranch::JwtSql { is_async }),
            (AuthType::Jwt, F::KeyValue, is_async) => Some(AuthBranch::JwtKeyValue { is_async }),
            (AuthType::Jwt, F::Document, is_async) => Some(AuthBranch::JwtDocument { is_async }),
            (AuthType::Jwt, F::None, _) => {
                return Err(DomainError::UnsupportedCombination {
                    auth: auth_type.to_string(),
                    database: database.to_string(),
                    reason: "JWT endpoints register and look up users in a database".into(),
                });
            }

            (AuthType::OAuth2, F::Relational, is_async) => {
                Some(AuthBranch::OAuth2Sql { is_async })
            }
            (AuthType::OAuth2, F::None | F::Document | F::KeyValue, _) => {
                Some(AuthBranch::OAuth2Simple)
            }

            (AuthType::ApiKey, _, _) => Some(AuthBranch::ApiKey),
        };

        let database_imports = match (auth_type, family, is_async) {
            (AuthType::Jwt, F::Relational, true) => DatabaseImports::SqlAsync,
            (AuthType::Jwt, F::Relational, false) => DatabaseImports::SqlSync,
            (AuthType::Jwt, F::KeyValue, _) => DatabaseImports::KeyValue,
            (AuthType::Jwt, F::Document, _) => DatabaseImports::Document,
            _ => DatabaseImports::None,
        };

        let project_endpoints = match project_type {
            ProjectType::Api => ProjectEndpoints::None,
            ProjectType::MlApi => ProjectEndpoints::MlApi,
            ProjectType::Microservice => ProjectEndpoints::Microservice {
                authenticated: auth_type.is_enabled(),
            },
        };

        let router = if auth.is_some() {
            RouterAssembly::WithAuth
        } else {
            RouterAssembly::RootOnly
        };

        // JWT imports the `User` model/schema with its database imports.
        let current_user_type = if auth_type == AuthType::Jwt {
            "User"
        } else {
            "dict"
        };

        Ok(Self {
            auth,
            database_imports,
            project_endpoints,
            router,
            current_user_type,
        })
    }

    /// Names of every payload this selection renders.
    pub fn template_names(&self) -> Vec<&'static str> {
        let mut names = vec![ENDPOINTS_BASE];
        if self.auth.is_some() {
            names.push(AUTH_IMPORTS);
        }
        names.extend(self.database_imports.template_name());
        names.extend(self.project_endpoints.template_name());
        names.extend(self.auth.map(|a| a.template_name()));
        names.push(self.router.template_name());
        names
    }

    /// Output paths, in lexicographic order.
    pub fn output_paths(&self) -> Vec<&'static str> {
        let mut paths = vec![ROUTER_PATH];
        if self.auth.is_some() {
            paths.push(AUTH_PATH);
        }
        paths.push(ENDPOINTS_PATH);
        paths
    }
}

// ── Enumeration ──────────────────────────────────────────────────────────────

/// One row of the full decision matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub project_type: ProjectType,
    pub database: DatabaseType,
    pub auth: AuthType,
    pub is_async: bool,
    pub selection: Result<Selection, DomainError>,
}

/// Every `(project, database, auth, async)` key with its selection result.
pub fn all_combinations() -> Vec<Combination> {
    let mut rows =
        Vec::with_capacity(ProjectType::ALL.len() * DatabaseType::ALL.len() * AuthType::ALL.len() * 2);
    for project_type in ProjectType::ALL {
        for database in DatabaseType::ALL {
            for auth in AuthType::ALL {
                for is_async in [true, false] {
                    rows.push(Combination {
                        project_type,
                        database,
                        auth,
                        is_async,
                        selection: Selection::for_choices(project_type, database, auth, is_async),
                    });
                }
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(auth: AuthType, db: DatabaseType, is_async: bool) -> Selection {
        Selection::for_choices(ProjectType::Api, db, auth, is_async).unwrap()
    }

    #[test]
    fn no_auth_means_no_auth_branch_and_root_router() {
        for db in DatabaseType::ALL {
            let s = select(AuthType::None, db, true);
            assert_eq!(s.auth, None);
            assert_eq!(s.router, RouterAssembly::RootOnly);
            assert_eq!(s.database_imports, DatabaseImports::None);
        }
    }

    #[test]
    fn jwt_follows_database_family() {
        assert_eq!(
            select(AuthType::Jwt, DatabaseType::Mysql, false).auth,
            Some(AuthBranch::JwtSql { is_async: false })
        );
        assert_eq!(
            select(AuthType::Jwt, DatabaseType::Redis, true).auth,
            Some(AuthBranch::JwtKeyValue { is_async: true })
        );
        assert_eq!(
            select(AuthType::Jwt, DatabaseType::Mongodb, true).auth,
            Some(AuthBranch::JwtDocument { is_async: true })
        );
    }

    #[test]
    fn jwt_without_database_is_unsupported() {
        let err = Selection::for_choices(ProjectType::Api, DatabaseType::None, AuthType::Jwt, true)
            .unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedCombination { .. }));
    }

    #[test]
    fn oauth2_uses_db_only_for_relational() {
        assert_eq!(
            select(AuthType::OAuth2, DatabaseType::Sqlite, true).auth,
            Some(AuthBranch::OAuth2Sql { is_async: true })
        );
        for db in [DatabaseType::None, DatabaseType::Mongodb, DatabaseType::Redis] {
            assert_eq!(
                select(AuthType::OAuth2, db, false).auth,
                Some(AuthBranch::OAuth2Simple)
            );
        }
    }

    #[test]
    fn database_imports_only_for_jwt() {
        assert_eq!(
            select(AuthType::Jwt, DatabaseType::Postgres, true).database_imports,
            DatabaseImports::SqlAsync
        );
        assert_eq!(
            select(AuthType::Jwt, DatabaseType::Mongodb, false).database_imports,
            DatabaseImports::Document
        );
        assert_eq!(
            select(AuthType::OAuth2, DatabaseType::Postgres, true).database_imports,
            DatabaseImports::None
        );
    }

    #[test]
    fn sql_branches_carry_session_variables() {
        let vars = AuthBranch::JwtSql { is_async: true }.variables();
        assert!(vars.contains(&("SESSION_TYPE", "AsyncSession")));
        assert!(vars.contains(&("AWAIT", "await ")));

        let vars = AuthBranch::OAuth2Sql { is_async: false }.variables();
        assert!(vars.contains(&("SESSION_TYPE", "Session")));
        assert!(vars.contains(&("AWAIT", "")));
    }

    #[test]
    fn microservice_process_is_authenticated_only_with_auth() {
        let s = Selection::for_choices(
            ProjectType::Microservice,
            DatabaseType::None,
            AuthType::None,
            true,
        )
        .unwrap();
        assert_eq!(
            s.project_endpoints,
            ProjectEndpoints::Microservice {
                authenticated: false
            }
        );

        let s = Selection::for_choices(
            ProjectType::Microservice,
            DatabaseType::None,
            AuthType::ApiKey,
            true,
        )
        .unwrap();
        assert_eq!(
            s.project_endpoints,
            ProjectEndpoints::Microservice {
                authenticated: true
            }
        );
        assert_eq!(s.current_user_type, "dict");
    }

    #[test]
    fn output_paths_are_sorted() {
        let s = select(AuthType::ApiKey, DatabaseType::None, true);
        let mut sorted = s.output_paths();
        sorted.sort_unstable();
        assert_eq!(s.output_paths(), sorted);
        assert_eq!(s.output_paths().len(), 3);
        assert_eq!(select(AuthType::None, DatabaseType::None, true).output_paths().len(), 2);
    }

    #[test]
    fn matrix_covers_every_key() {
        let rows = all_combinations();
        assert_eq!(rows.len(), 3 * 6 * 4 * 2);

        let errors: Vec<_> = rows.iter().filter(|r| r.selection.is_err()).collect();
        // jwt + none, for every project type and async flag
        assert_eq!(errors.len(), 3 * 2);
        assert!(errors
            .iter()
            .all(|r| r.auth == AuthType::Jwt && r.database == DatabaseType::None));
    }
}
