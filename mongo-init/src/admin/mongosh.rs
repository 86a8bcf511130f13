//! `createUser` through the mongosh shell
//!
//! The script and every secret in it go through stdin. Values are embedded
//! as a single JSON string literal, so nothing a user puts in a password can
//! change what the script does.

use super::{AdminInterface, CreateUser};
use crate::config::AdminConnection;
use anyhow::{Context, Result};
use common::run_checked;
use serde::Serialize;
use tracing::{debug, info};

const SCRIPT_TEMPLATE: &str = r#"const request = JSON.parse(__REQUEST__);
try {
    if (request.root) {
        db.getSiblingDB('admin').auth(request.root.user, request.root.pwd);
    }
    db.getSiblingDB(request.authSource).createUser(request.createUser);
    print(`Created user ${request.createUser.user}`);
} catch (err) {
    print(err.message || String(err));
    quit(1);
}
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptRequest<'a> {
    auth_source: &'a str,
    root: Option<RootAuth<'a>>,
    create_user: &'a CreateUser,
}

#[derive(Serialize)]
struct RootAuth<'a> {
    user: &'a str,
    pwd: &'a str,
}

/// [`AdminInterface`] backed by a `mongosh` child process.
#[derive(Debug, Clone)]
pub struct Mongosh {
    connection: AdminConnection,
}

impl Mongosh {
    pub fn new(connection: AdminConnection) -> Self {
        Self { connection }
    }

    fn args(&self) -> Vec<&str> {
        vec![
            "--quiet",
            "--norc",
            self.connection.uri.as_str(),
            "--file",
            "/dev/stdin",
        ]
    }

    /// Render the script fed to mongosh.
    pub(crate) fn render_script(&self, request: &CreateUser) -> Result<String> {
        let root = match (&self.connection.root_user, &self.connection.root_password) {
            (Some(user), Some(pwd)) => Some(RootAuth { user, pwd }),
            _ => None,
        };
        let payload = serde_json::to_string(&ScriptRequest {
            auth_source: &self.connection.auth_source,
            root,
            create_user: request,
        })
        .context("Failed to encode createUser request")?;
        // Encoding the JSON text again yields a valid JS string literal
        let literal = serde_json::to_string(&payload).context("Failed to quote request")?;

        Ok(SCRIPT_TEMPLATE.replace("__REQUEST__", &literal))
    }
}

impl AdminInterface for Mongosh {
    fn create_user(&self, request: &CreateUser) -> Result<()> {
        let script = self.render_script(request)?;
        debug!(
            bin = %self.connection.mongosh_bin,
            uri = %self.connection.uri,
            auth_source = %self.connection.auth_source,
            root_auth = self.connection.root_user.is_some(),
            "Running createUser"
        );

        let stdout = run_checked(&self.connection.mongosh_bin, &self.args(), &script)?;
        if !stdout.is_empty() {
            info!(output = %stdout, "mongosh finished");
        }
        Ok(())
    }
}
