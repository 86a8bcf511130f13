use std::path::PathBuf;

/// Every way a bootstrap run can fail. All of them are terminal.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Missing required environment variables: {}", missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    #[error("Error reading password file {}: {source}", path.display())]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("createUser failed: {0:#}")]
    Provisioning(#[source] anyhow::Error),
}

impl BootstrapError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Short name of the step that failed, for log fields.
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "validate_config",
            Self::SecretRead { .. } => "read_secret",
            Self::Provisioning(_) => "create_user",
        }
    }
}
