//! Database user bootstrap
//!
//! Runs ONCE at container startup. Creates the application user named by
//! SPIRE_DB_USER with the password from SPIRE_DB_PASSWORD_FILE and grants it
//! readWrite on its database. Any failure exits 1; nothing is retried.

use common::{init_logging, ProcessEnv};
use mongo_init::{run, BootstrapConfig, Mongosh};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

fn main() -> ExitCode {
    let _guard = init_logging("mongo-init", &ProcessEnv);

    let start = Instant::now();
    info!("User bootstrap starting...");

    let config = BootstrapConfig::from_env(&ProcessEnv);
    let admin = Mongosh::new(config.admin.clone());

    match run(&config, &admin) {
        Ok(provisioned) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            info!(
                user = %provisioned.username,
                database = %provisioned.database,
                duration_ms,
                "User bootstrap completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(phase = e.phase(), error = %e, "User bootstrap failed");
            ExitCode::from(e.exit_code())
        }
    }
}
