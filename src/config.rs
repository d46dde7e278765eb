use crate::error::{BadEnvVarSnafu, DirectoryResult};
use snafu::ResultExt;
use sqlx::sqlite::SqliteConnectOptions;
use std::{env::VarError, path::PathBuf, sync::Arc};

pub const DEFAULT_DB_PATH: &str = "./students.sqlite";
pub const DEFAULT_SERVER_IP: &str = "0.0.0.0:8001";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    server_ip: Arc<str>,
}

impl RuntimeConfiguration {
    pub fn new() -> DirectoryResult<Self> {
        Self::from_lookup(dotenvy::var)
    }

    /// Builds the configuration from any env-var style lookup, with unset variables falling back to
    /// defaults.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> DirectoryResult<Self> {
        let get_env_var = |name, default: &str| match lookup(name) {
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(default.to_string()),
            other => other.context(BadEnvVarSnafu { name }),
        };

        Ok(Self {
            db_config: Arc::new(DbConfig {
                path: get_env_var("STUDENTS_DB_PATH", DEFAULT_DB_PATH)?.into(),
            }),
            server_ip: get_env_var("STUDENTS_SERVER_IP", DEFAULT_SERVER_IP)?.into(),
        })
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Debug)]
pub struct DbConfig {
    path: PathBuf,
}

impl DbConfig {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn unset_vars_use_defaults() {
        let config =
            RuntimeConfiguration::from_lookup(|_| Err(dotenvy::Error::EnvVar(VarError::NotPresent)))
                .unwrap();

        assert_eq!(config.server_ip(), DEFAULT_SERVER_IP);
        assert_eq!(config.db_config().path, PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn set_vars_override_defaults() {
        let config = RuntimeConfiguration::from_lookup(|name| match name {
            "STUDENTS_DB_PATH" => Ok("/var/lib/students/db.sqlite".to_string()),
            "STUDENTS_SERVER_IP" => Ok("127.0.0.1:9000".to_string()),
            _ => Err(dotenvy::Error::EnvVar(VarError::NotPresent)),
        })
        .unwrap();

        assert_eq!(config.server_ip(), "127.0.0.1:9000");
        assert_eq!(
            config.db_config().path,
            PathBuf::from("/var/lib/students/db.sqlite")
        );
    }

    #[test]
    fn unreadable_var_is_an_error() {
        let result = RuntimeConfiguration::from_lookup(|name| match name {
            "STUDENTS_SERVER_IP" => Err(dotenvy::Error::EnvVar(VarError::NotUnicode(
                OsString::from("bad"),
            ))),
            _ => Err(dotenvy::Error::EnvVar(VarError::NotPresent)),
        });

        assert!(matches!(
            result,
            Err(crate::error::DirectoryError::BadEnvVar {
                name: "STUDENTS_SERVER_IP",
                ..
            })
        ));
    }
}
