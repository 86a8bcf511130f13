//! Bootstrap runner
//!
//! Validates the configuration, resolves the password and issues exactly one
//! `createUser`. Returns a classification; exiting is the binary's job.

use crate::admin::{AdminInterface, CreateUser};
use crate::config::{BootstrapConfig, DATABASE_VAR, PASSWORD_FILE_VAR, USER_VAR};
use crate::credential::{read_password, CredentialRequest};
use crate::error::BootstrapError;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    pub username: String,
    pub database: String,
}

/// Required inputs after validation, before any I/O.
struct ValidInputs<'a> {
    user: &'a str,
    password_file: &'a Path,
    database: &'a str,
}

fn validate(config: &BootstrapConfig) -> Result<ValidInputs<'_>, BootstrapError> {
    let user = config.user.as_deref().filter(|v| !v.is_empty());
    let password_file = config
        .password_file
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty());
    let database = config.database.as_deref().filter(|v| !v.is_empty());

    match (user, password_file, database) {
        (Some(user), Some(password_file), Some(database)) => Ok(ValidInputs {
            user,
            password_file,
            database,
        }),
        _ => {
            let missing = [
                (USER_VAR, user.is_none()),
                (PASSWORD_FILE_VAR, password_file.is_none()),
                (DATABASE_VAR, database.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            Err(BootstrapError::Configuration { missing })
        }
    }
}

/// Run one provisioning attempt.
pub fn run(
    config: &BootstrapConfig,
    admin: &dyn AdminInterface,
) -> Result<Provisioned, BootstrapError> {
    let inputs = validate(config)?;

    let password = read_password(inputs.password_file)?;
    if password.is_empty() {
        warn!(path = %inputs.password_file.display(), "Password file is empty");
    }

    let request = CredentialRequest {
        username: inputs.user.to_string(),
        database: inputs.database.to_string(),
        password,
    };

    info!(
        user = %request.username,
        database = %request.database,
        "Creating user"
    );

    admin
        .create_user(&CreateUser::from(&request))
        .map_err(BootstrapError::Provisioning)?;

    Ok(Provisioned {
        username: request.username,
        database: request.database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::RoleGrant;
    use crate::config::AdminConnection;
    use anyhow::bail;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    /// Records every call; optionally behaves like a server that rejects
    /// duplicate users.
    #[derive(Default)]
    struct RecordingAdmin {
        calls: RefCell<Vec<CreateUser>>,
        fail_with: Option<&'static str>,
        reject_duplicates: bool,
    }

    impl AdminInterface for RecordingAdmin {
        fn create_user(&self, request: &CreateUser) -> anyhow::Result<()> {
            let duplicate = self
                .calls
                .borrow()
                .iter()
                .any(|c| c.user == request.user);
            self.calls.borrow_mut().push(request.clone());

            if let Some(message) = self.fail_with {
                bail!("{}", message);
            }
            if self.reject_duplicates && duplicate {
                bail!("User \"{}@admin\" already exists", request.user);
            }
            Ok(())
        }
    }

    fn admin_connection() -> AdminConnection {
        AdminConnection::from_env(&HashMap::<&str, &str>::new())
    }

    fn secret_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn config(user: &str, password_file: &Path, database: &str) -> BootstrapConfig {
        BootstrapConfig {
            user: Some(user.to_string()),
            password_file: Some(password_file.to_path_buf()),
            database: Some(database.to_string()),
            admin: admin_connection(),
        }
    }

    #[test]
    fn test_happy_path_issues_single_create_user() {
        let file = secret_file("hunter2");
        let admin = RecordingAdmin::default();

        let outcome = run(&config("alice", file.path(), "alice"), &admin).unwrap();

        assert_eq!(
            outcome,
            Provisioned {
                username: "alice".into(),
                database: "alice".into()
            }
        );
        assert_eq!(
            *admin.calls.borrow(),
            vec![CreateUser {
                user: "alice".into(),
                pwd: "hunter2".into(),
                roles: vec![RoleGrant {
                    role: "readWrite".into(),
                    db: "alice".into()
                }],
            }]
        );
    }

    #[test]
    fn test_every_missing_subset_fails_before_io() {
        // The path is unreadable, so a read attempt would surface as SecretRead
        for mask in 0u8..7 {
            let has_user = mask & 1 != 0;
            let has_file = mask & 2 != 0;
            let has_db = mask & 4 != 0;

            for empty in [false, true] {
                let absent = |present: bool, value: &str| match (present, empty) {
                    (true, _) => Some(value.to_string()),
                    (false, true) => Some(String::new()),
                    (false, false) => None,
                };
                let config = BootstrapConfig {
                    user: absent(has_user, "alice"),
                    password_file: absent(has_file, "/nonexistent/db_password")
                        .map(PathBuf::from),
                    database: absent(has_db, "alice"),
                    admin: admin_connection(),
                };
                let admin = RecordingAdmin::default();

                let err = run(&config, &admin).unwrap_err();
                match &err {
                    BootstrapError::Configuration { missing } => {
                        assert_eq!(missing.contains(&USER_VAR), !has_user);
                        assert_eq!(missing.contains(&PASSWORD_FILE_VAR), !has_file);
                        assert_eq!(missing.contains(&DATABASE_VAR), !has_db);
                    }
                    other => panic!("mask {mask}: unexpected error {other}"),
                }
                assert_ne!(err.exit_code(), 0);
                assert!(admin.calls.borrow().is_empty());
            }
        }
    }

    #[test]
    fn test_unreadable_password_file_skips_admin_call() {
        let admin = RecordingAdmin::default();
        let err = run(
            &config("alice", Path::new("/nonexistent/db_password"), "alice"),
            &admin,
        )
        .unwrap_err();

        assert!(matches!(err, BootstrapError::SecretRead { .. }));
        assert_ne!(err.exit_code(), 0);
        assert!(admin.calls.borrow().is_empty());
    }

    #[test]
    fn test_password_is_trimmed_before_call() {
        let file = secret_file("  secret123\n");
        let admin = RecordingAdmin::default();

        run(&config("alice", file.path(), "alice"), &admin).unwrap();
        assert_eq!(admin.calls.borrow()[0].pwd, "secret123");
    }

    #[test]
    fn test_empty_password_is_accepted() {
        let file = secret_file("\n");
        let admin = RecordingAdmin::default();

        run(&config("alice", file.path(), "alice"), &admin).unwrap();
        assert_eq!(admin.calls.borrow()[0].pwd, "");
    }

    #[test]
    fn test_admin_failure_is_not_retried() {
        let file = secret_file("hunter2");
        let admin = RecordingAdmin {
            fail_with: Some("connection refused"),
            ..Default::default()
        };

        let err = run(&config("alice", file.path(), "alice"), &admin).unwrap_err();

        assert!(matches!(err, BootstrapError::Provisioning(_)));
        assert!(err.to_string().contains("connection refused"));
        assert_ne!(err.exit_code(), 0);
        assert_eq!(admin.calls.borrow().len(), 1);
    }

    #[test]
    fn test_second_run_surfaces_duplicate_user() {
        let file = secret_file("hunter2");
        let admin = RecordingAdmin {
            reject_duplicates: true,
            ..Default::default()
        };
        let config = config("alice", file.path(), "alice");

        run(&config, &admin).unwrap();
        let err = run(&config, &admin).unwrap_err();

        assert!(matches!(err, BootstrapError::Provisioning(_)));
        assert!(err.to_string().contains("already exists"));
        assert_eq!(admin.calls.borrow().len(), 2);
    }

    #[test]
    fn test_database_independent_of_user() {
        let file = secret_file("hunter2");
        let admin = RecordingAdmin::default();

        let outcome = run(&config("alice", file.path(), "inventory"), &admin).unwrap();

        assert_eq!(outcome.database, "inventory");
        assert_eq!(admin.calls.borrow()[0].roles[0].db, "inventory");
    }

    #[test]
    fn test_config_from_env_feeds_runner() {
        let file = secret_file("hunter2\n");
        let path = file.path().to_string_lossy().into_owned();
        let env = HashMap::from([
            ("SPIRE_DB_USER", "alice"),
            ("SPIRE_DB_PASSWORD_FILE", path.as_str()),
        ]);
        let admin = RecordingAdmin::default();

        run(&BootstrapConfig::from_env(&env), &admin).unwrap();

        let calls = admin.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user, "alice");
        assert_eq!(calls[0].pwd, "hunter2");
        assert_eq!(calls[0].roles[0].db, "alice");
    }
}
