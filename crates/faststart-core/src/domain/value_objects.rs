//! Domain value objects: ProjectType, DatabaseType, DatabaseFamily, AuthType.
//!
//! # Design
//!
//! These are plain `Copy` value types with equality by value.
//! They hold NO selection logic. Which payload a combination produces lives
//! in `decision_table.rs`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here (and to its `ALL` table)
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add the branch in `decision_table.rs`; the compiler points at every
//!    `match` that needs it

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProjectType ──────────────────────────────────────────────────────────────

/// The functional archetype of the generated service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Plain REST API.
    Api,
    /// API serving a machine-learning model.
    #[serde(alias = "ml_api", alias = "ml")]
    MlApi,
    /// Small single-purpose service.
    Microservice,
}

impl ProjectType {
    pub const ALL: [Self; 3] = [Self::Api, Self::MlApi, Self::Microservice];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::MlApi => "ml-api",
            Self::Microservice => "microservice",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" | "rest" => Ok(Self::Api),
            "ml-api" | "ml_api" | "ml" => Ok(Self::MlApi),
            "microservice" | "service" => Ok(Self::Microservice),
            other => Err(DomainError::InvalidConfig(format!(
                "unknown project type: {other}"
            ))),
        }
    }
}

// ── DatabaseType ─────────────────────────────────────────────────────────────

/// Backend storage technology selected for the generated service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    None,
    Postgres,
    Mysql,
    Sqlite,
    Mongodb,
    Redis,
}

impl DatabaseType {
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Postgres,
        Self::Mysql,
        Self::Sqlite,
        Self::Mongodb,
        Self::Redis,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Mongodb => "mongodb",
            Self::Redis => "redis",
        }
    }

    /// Storage family this backend belongs to.
    ///
    /// Selection never looks at the concrete backend, only at its family.
    pub const fn family(self) -> DatabaseFamily {
        match self {
            Self::None => DatabaseFamily::None,
            Self::Postgres | Self::Mysql | Self::Sqlite => DatabaseFamily::Relational,
            Self::Mongodb => DatabaseFamily::Document,
            Self::Redis => DatabaseFamily::KeyValue,
        }
    }

    /// Human-readable backend name used inside generated docstrings.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Postgres => "PostgreSQL",
            Self::Mysql => "MySQL",
            Self::Sqlite => "SQLite",
            Self::Mongodb => "MongoDB",
            Self::Redis => "Redis",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "redis" => Ok(Self::Redis),
            other => Err(DomainError::InvalidConfig(format!(
                "unknown database type: {other}"
            ))),
        }
    }
}

// ── DatabaseFamily ───────────────────────────────────────────────────────────

/// Coarse classification of a [`DatabaseType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseFamily {
    /// No database configured.
    None,
    /// SQL-capable backend driven through a session object.
    Relational,
    /// Document store (MongoDB-like).
    Document,
    /// Key-value cache store (Redis-like).
    KeyValue,
}

impl DatabaseFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Relational => "relational",
            Self::Document => "document",
            Self::KeyValue => "key-value",
        }
    }
}

impl fmt::Display for DatabaseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AuthType ─────────────────────────────────────────────────────────────────

/// Authentication scheme to scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthType {
    None,
    Jwt,
    #[serde(rename = "oauth2")]
    OAuth2,
    ApiKey,
}

impl AuthType {
    pub const ALL: [Self; 4] = [Self::None, Self::Jwt, Self::OAuth2, Self::ApiKey];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Jwt => "jwt",
            Self::OAuth2 => "oauth2",
            Self::ApiKey => "api-key",
        }
    }

    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "jwt" => Ok(Self::Jwt),
            "oauth2" | "oauth" => Ok(Self::OAuth2),
            "api-key" | "api_key" | "apikey" => Ok(Self::ApiKey),
            other => Err(DomainError::InvalidConfig(format!(
                "unknown auth type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_display_is_kebab() {
        assert_eq!(ProjectType::MlApi.to_string(), "ml-api");
        assert_eq!(ProjectType::Microservice.to_string(), "microservice");
    }

    #[test]
    fn project_type_from_str_accepts_aliases() {
        assert_eq!("ML_API".parse::<ProjectType>().unwrap(), ProjectType::MlApi);
        assert_eq!("ml".parse::<ProjectType>().unwrap(), ProjectType::MlApi);
        assert_eq!(
            "service".parse::<ProjectType>().unwrap(),
            ProjectType::Microservice
        );
        assert!("cli".parse::<ProjectType>().is_err());
    }

    #[test]
    fn database_family_classification() {
        assert_eq!(DatabaseType::None.family(), DatabaseFamily::None);
        assert_eq!(DatabaseType::Postgres.family(), DatabaseFamily::Relational);
        assert_eq!(DatabaseType::Mysql.family(), DatabaseFamily::Relational);
        assert_eq!(DatabaseType::Sqlite.family(), DatabaseFamily::Relational);
        assert_eq!(DatabaseType::Mongodb.family(), DatabaseFamily::Document);
        assert_eq!(DatabaseType::Redis.family(), DatabaseFamily::KeyValue);
    }

    #[test]
    fn database_from_str_accepts_aliases() {
        assert_eq!("pg".parse::<DatabaseType>().unwrap(), DatabaseType::Postgres);
        assert_eq!("Mongo".parse::<DatabaseType>().unwrap(), DatabaseType::Mongodb);
        assert!("oracle".parse::<DatabaseType>().is_err());
    }

    #[test]
    fn auth_from_str_accepts_aliases() {
        assert_eq!("API_KEY".parse::<AuthType>().unwrap(), AuthType::ApiKey);
        assert_eq!("oauth".parse::<AuthType>().unwrap(), AuthType::OAuth2);
        assert!("saml".parse::<AuthType>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for t in ProjectType::ALL {
            assert_eq!(t.to_string().parse::<ProjectType>().unwrap(), t);
        }
        for d in DatabaseType::ALL {
            assert_eq!(d.to_string().parse::<DatabaseType>().unwrap(), d);
        }
        for a in AuthType::ALL {
            assert_eq!(a.to_string().parse::<AuthType>().unwrap(), a);
        }
    }

    #[test]
    fn only_none_auth_is_disabled() {
        assert!(!AuthType::None.is_enabled());
        assert!(AuthType::Jwt.is_enabled());
        assert!(AuthType::OAuth2.is_enabled());
        assert!(AuthType::ApiKey.is_enabled());
    }
}
