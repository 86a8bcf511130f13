//! Credential resolution

use crate::error::BootstrapError;
use std::fmt;
use std::path::Path;

/// Validated username, database and password for one provisioning call.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRequest {
    pub username: String,
    pub database: String,
    pub password: String,
}

impl fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("username", &self.username)
            .field("database", &self.database)
            .field("password", &"***")
            .finish()
    }
}

/// Read the password file and strip surrounding whitespace.
///
/// An empty result is returned as-is; deciding whether that is acceptable
/// is left to the caller.
pub fn read_password(path: &Path) -> Result<String, BootstrapError> {
    let content = std::fs::read_to_string(path).map_err(|source| BootstrapError::SecretRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.trim().to_string())
}
