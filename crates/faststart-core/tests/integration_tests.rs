//! Integration tests for faststart-core: selection and rendering end to end.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use faststart_core::{
    application::ApplicationError,
    domain::{AUTH_PATH, ENDPOINTS_PATH, ROUTER_PATH, all_combinations, payloads},
    prelude::*,
};

#[derive(Clone)]
struct PayloadStore(Arc<RwLock<BTreeMap<String, Template>>>);

impl PayloadStore {
    fn builtin() -> Self {
        let map = payloads::builtin()
            .into_iter()
            .map(|t| (t.id.name().to_string(), t))
            .collect();
        Self(Arc::new(RwLock::new(map)))
    }
}

impl TemplateStore for PayloadStore {
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

fn selector() -> TemplateSelector {
    TemplateSelector::new(Box::new(PayloadStore::builtin()))
}

fn config(project: ProjectType, db: DatabaseType, auth: AuthType, is_async: bool) -> ProjectConfig {
    ProjectConfig::builder()
        .name("inventory-service")
        .path("/out/inventory-service")
        .project_type(project)
        .database(db)
        .auth(auth)
        .is_async(is_async)
        .build()
        .unwrap()
}

fn render(project: ProjectType, db: DatabaseType, auth: AuthType, is_async: bool) -> ProjectStructure {
    selector().render(&config(project, db, auth, is_async)).unwrap()
}

/// Body of the Python function `name`, up to the next decorator.
fn function_block<'a>(source: &'a str, name: &str) -> &'a str {
    let start = source
        .find(&format!("def {name}("))
        .unwrap_or_else(|| panic!("no function {name}"));
    let rest = &source[start..];
    let end = rest.find("\n@router").unwrap_or(rest.len());
    &rest[..end]
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn rendering_is_deterministic() {
    for row in all_combinations() {
        if row.selection.is_err() {
            continue;
        }
        let cfg = config(row.project_type, row.database, row.auth, row.is_async);
        let a = selector().render(&cfg).unwrap();
        let b = selector().render(&cfg).unwrap();
        assert_eq!(a, b, "non-deterministic output for {cfg}");
    }
}

#[test]
fn every_supported_combination_renders_without_leftover_placeholders() {
    for row in all_combinations() {
        let cfg = config(row.project_type, row.database, row.auth, row.is_async);
        match row.selection {
            Ok(selection) => {
                let out = selector().render(&cfg).unwrap();
                let paths: Vec<_> = out.paths().map(|p| p.as_str().to_string()).collect();
                assert_eq!(paths, selection.output_paths(), "paths for {cfg}");
                for file in out.files() {
                    assert!(!file.content.contains("{{"), "{} in {cfg}", file.path);
                }
            }
            Err(_) => assert!(selector().render(&cfg).is_err()),
        }
    }
}

#[test]
fn no_auth_emits_no_auth_file_and_reexports_root_router() {
    for db in DatabaseType::ALL {
        let out = render(ProjectType::Api, db, AuthType::None, true);
        assert!(!out.contains(AUTH_PATH));
        let router = out.get(ROUTER_PATH).unwrap();
        assert!(router.contains("from .endpoints import router"));
        assert!(!router.contains("include_router"));
        assert!(!out.get(ENDPOINTS_PATH).unwrap().contains("get_current_user"));
    }
}

#[test]
fn jwt_relational_async_awaits_user_calls() {
    for db in [DatabaseType::Postgres, DatabaseType::Mysql, DatabaseType::Sqlite] {
        let out = render(ProjectType::Api, db, AuthType::Jwt, true);
        let auth = out.get(AUTH_PATH).unwrap();
        assert!(auth.contains("from sqlalchemy.ext.asyncio import AsyncSession"));
        assert!(auth.contains("await authenticate_user("));
        assert!(auth.contains("await get_user_by_email("));
        assert!(auth.contains("await create_user("));

        let endpoints = out.get(ENDPOINTS_PATH).unwrap();
        assert!(endpoints.contains("from app.db.database import get_db"));
        assert!(endpoints.contains("AsyncSession"));
        assert!(endpoints.contains("from app.models.auth import User"));
    }
}

#[test]
fn jwt_relational_sync_uses_plain_session() {
    let out = render(ProjectType::Api, DatabaseType::Postgres, AuthType::Jwt, false);
    let auth = out.get(AUTH_PATH).unwrap();
    assert!(auth.contains("from sqlalchemy.orm import Session"));
    assert!(auth.contains("db: Session = Depends(get_db)"));
    assert!(!auth.contains("await "));
    assert!(!auth.contains("AsyncSession"));
}

#[test]
fn jwt_redis_stubs_register_and_update() {
    for is_async in [true, false] {
        let out = render(ProjectType::Api, DatabaseType::Redis, AuthType::Jwt, is_async);
        let auth = out.get(AUTH_PATH).unwrap();
        assert!(function_block(auth, "register_user").contains("HTTP_501_NOT_IMPLEMENTED"));
        assert!(function_block(auth, "update_user_me").contains("HTTP_501_NOT_IMPLEMENTED"));
        assert!(!auth.contains("get_db"));
        assert_eq!(auth.contains("async def register_user"), is_async);
    }
}

#[test]
fn jwt_mongodb_has_its_own_branch() {
    let out = render(ProjectType::Api, DatabaseType::Mongodb, AuthType::Jwt, true);
    let auth = out.get(AUTH_PATH).unwrap();
    assert!(auth.contains("MongoDB"));
    assert!(function_block(auth, "register_user").contains("HTTP_501_NOT_IMPLEMENTED"));
    assert!(!auth.contains("Session"));
}

#[test]
fn jwt_without_database_is_a_configuration_error() {
    let err = selector()
        .render(&config(ProjectType::Api, DatabaseType::None, AuthType::Jwt, true))
        .unwrap_err();
    assert_eq!(err.category(), faststart_core::error::ErrorCategory::Configuration);
}

#[test]
fn oauth2_without_relational_db_is_simple() {
    for db in [DatabaseType::None, DatabaseType::Mongodb, DatabaseType::Redis] {
        let out = render(ProjectType::Api, db, AuthType::OAuth2, true);
        let auth = out.get(AUTH_PATH).unwrap();
        assert!(auth.contains("OAuth2 Authentication Endpoints (Simple)"));
        assert!(auth.contains("/logout"));
        assert!(!auth.contains("get_db"));
    }
}

#[test]
fn api_key_is_independent_of_database() {
    let reference = render(ProjectType::Api, DatabaseType::None, AuthType::ApiKey, true);
    for db in DatabaseType::ALL {
        for is_async in [true, false] {
            let out = render(ProjectType::Api, db, AuthType::ApiKey, is_async);
            assert_eq!(out.get(AUTH_PATH), reference.get(AUTH_PATH));
        }
    }
}

#[test]
fn microservice_without_auth_has_no_current_user() {
    let out = render(ProjectType::Microservice, DatabaseType::None, AuthType::None, true);
    let process = function_block(out.get(ENDPOINTS_PATH).unwrap(), "process_data");
    assert!(!process.contains("current_user"));
}

#[test]
fn microservice_with_auth_depends_on_current_user() {
    let out = render(ProjectType::Microservice, DatabaseType::Postgres, AuthType::Jwt, true);
    let process = function_block(out.get(ENDPOINTS_PATH).unwrap(), "process_data");
    assert!(process.contains("current_user: User = Depends(get_current_user)"));

    let out = render(ProjectType::Microservice, DatabaseType::None, AuthType::ApiKey, true);
    let process = function_block(out.get(ENDPOINTS_PATH).unwrap(), "process_data");
    assert!(process.contains("current_user: dict = Depends(get_current_user)"));
}

#[test]
fn ml_api_has_exactly_one_predict_and_model_info_route() {
    let cases = [
        (DatabaseType::None, AuthType::None),
        (DatabaseType::None, AuthType::OAuth2),
        (DatabaseType::None, AuthType::ApiKey),
        (DatabaseType::Postgres, AuthType::Jwt),
        (DatabaseType::Postgres, AuthType::OAuth2),
        (DatabaseType::Redis, AuthType::Jwt),
        (DatabaseType::Mongodb, AuthType::Jwt),
    ];
    for (db, auth) in cases {
        let out = render(ProjectType::MlApi, db, auth, true);
        let endpoints = out.get(ENDPOINTS_PATH).unwrap();
        assert_eq!(endpoints.matches("@router.post(\"/predict\")").count(), 1);
        assert_eq!(endpoints.matches("@router.get(\"/model/info\")").count(), 1);
    }
}

#[test]
fn project_name_is_interpolated() {
    let out = render(ProjectType::Microservice, DatabaseType::None, AuthType::None, true);
    let endpoints = out.get(ENDPOINTS_PATH).unwrap();
    assert!(endpoints.contains("Welcome to Inventory Service API"));
    assert!(endpoints.contains("\"service\": \"inventory-service\""));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_plain_api_without_db_or_auth() {
    let out = render(ProjectType::Api, DatabaseType::None, AuthType::None, true);
    assert_eq!(out.file_count(), 2);
    assert!(out.contains(ENDPOINTS_PATH));
    assert!(out.contains(ROUTER_PATH));

    let endpoints = out.get(ENDPOINTS_PATH).unwrap();
    assert!(endpoints.contains("@router.get(\"/\")"));
    assert!(endpoints.contains("@router.get(\"/health\")"));
    assert!(!endpoints.contains("/predict"));
    assert!(!endpoints.contains("/status"));
}

#[test]
fn scenario_sync_microservice_with_postgres_and_oauth2() {
    let out = render(
        ProjectType::Microservice,
        DatabaseType::Postgres,
        AuthType::OAuth2,
        false,
    );
    assert_eq!(out.file_count(), 3);

    let endpoints = out.get(ENDPOINTS_PATH).unwrap();
    for route in [
        "@router.get(\"/\")",
        "@router.get(\"/health\")",
        "@router.get(\"/status\")",
        "@router.post(\"/process\")",
    ] {
        assert!(endpoints.contains(route), "missing {route}");
    }

    let auth = out.get(AUTH_PATH).unwrap();
    assert!(auth.contains("OAuth2PasswordRequestForm"));
    assert!(auth.contains("from sqlalchemy.orm import Session"));
    assert!(auth.contains("db: Session = Depends(get_db)"));
    assert!(!auth.contains("await "));

    let router = out.get(ROUTER_PATH).unwrap();
    assert!(router.contains(
        "router.include_router(auth_router, prefix=\"/auth\", tags=[\"authentication\"])"
    ));
}
