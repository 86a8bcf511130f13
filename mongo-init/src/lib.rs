//! MongoDB user bootstrap
//!
//! Provisions one database user at container startup:
//! - Configuration collected once from the environment
//! - Password read from a mounted secret file
//! - A single `createUser` granting `readWrite` on one database

pub mod admin;
pub mod config;
pub mod credential;
pub mod error;
pub mod runner;

pub use admin::{AdminInterface, CreateUser, Mongosh};
pub use config::{AdminConnection, BootstrapConfig};
pub use credential::CredentialRequest;
pub use error::BootstrapError;
pub use runner::{run, Provisioned};
