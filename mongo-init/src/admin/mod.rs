//! Administrative interface of the target database
//!
//! The runner only knows about [`AdminInterface`]; the `mongosh` backed
//! implementation lives in [`mongosh`].

mod mongosh;

pub use mongosh::Mongosh;

use crate::credential::CredentialRequest;
use serde::Serialize;

/// Role granted to every provisioned user.
pub const READ_WRITE_ROLE: &str = "readWrite";

/// A role scoped to one database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

/// The `createUser` document, in the shape the server expects.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CreateUser {
    pub user: String,
    pub pwd: String,
    pub roles: Vec<RoleGrant>,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("user", &self.user)
            .field("pwd", &"***")
            .field("roles", &self.roles)
            .finish()
    }
}

impl From<&CredentialRequest> for CreateUser {
    fn from(request: &CredentialRequest) -> Self {
        Self {
            user: request.username.clone(),
            pwd: request.password.clone(),
            roles: vec![RoleGrant {
                role: READ_WRITE_ROLE.to_string(),
                db: request.database.clone(),
            }],
        }
    }
}

/// Privileged user management on the target database.
pub trait AdminInterface {
    /// Create a user. Called once per run; failures are reported verbatim.
    fn create_user(&self, request: &CreateUser) -> anyhow::Result<()>;
}
