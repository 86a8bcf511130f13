//! Bootstrap configuration from environment variables
//!
//! Everything the runner needs is collected here once, at process entry.
//! Nothing below this module reads the environment.

use common::EnvSource;
use std::path::PathBuf;
use tracing::warn;

pub const USER_VAR: &str = "SPIRE_DB_USER";
pub const PASSWORD_FILE_VAR: &str = "SPIRE_DB_PASSWORD_FILE";
pub const DATABASE_VAR: &str = "SPIRE_DB_NAME";

pub const DEFAULT_MONGO_URI: &str = "mongodb://127.0.0.1:27017";
pub const DEFAULT_AUTH_SOURCE: &str = "admin";

/// Inputs for one provisioning run.
///
/// Required values are kept as `Option` so that validation, and the
/// diagnostic listing what is missing, happens in the runner.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub user: Option<String>,
    pub password_file: Option<PathBuf>,
    pub database: Option<String>,
    pub admin: AdminConnection,
}

/// How to reach the administrative interface.
#[derive(Clone)]
pub struct AdminConnection {
    pub mongosh_bin: String,
    pub uri: String,
    /// Database the new user is defined in.
    pub auth_source: String,
    pub root_user: Option<String>,
    pub root_password: Option<String>,
}

impl std::fmt::Debug for AdminConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConnection")
            .field("mongosh_bin", &self.mongosh_bin)
            .field("uri", &self.uri)
            .field("auth_source", &self.auth_source)
            .field("root_user", &self.root_user)
            .field("root_password", &self.root_password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl BootstrapConfig {
    /// Load configuration from an environment source.
    ///
    /// `SPIRE_DB_NAME` falls back to `SPIRE_DB_USER` so deployments that only
    /// set the user keep provisioning a database of the same name.
    pub fn from_env(env: &impl EnvSource) -> Self {
        let user = env.var(USER_VAR);
        let database = match env.var(DATABASE_VAR) {
            Some(db) => Some(db),
            None => {
                if let Some(user) = &user {
                    warn!(
                        database = %user,
                        "{} not set, granting access to the database named after the user",
                        DATABASE_VAR
                    );
                }
                user.clone()
            }
        };

        Self {
            user,
            password_file: env.var(PASSWORD_FILE_VAR).map(PathBuf::from),
            database,
            admin: AdminConnection::from_env(env),
        }
    }
}

impl AdminConnection {
    pub fn from_env(env: &impl EnvSource) -> Self {
        Self {
            mongosh_bin: env.var_or("MONGOSH_BIN", "mongosh"),
            uri: env.var_or("SPIRE_MONGO_URI", DEFAULT_MONGO_URI),
            auth_source: env.var_or("SPIRE_DB_AUTH_SOURCE", DEFAULT_AUTH_SOURCE),
            root_user: env.var("MONGO_INITDB_ROOT_USERNAME"),
            root_password: env.var("MONGO_INITDB_ROOT_PASSWORD"),
        }
    }
}
