//! Storage infrastructure

pub mod migrations;

pub use migrations::{run_migrations, user_migrations, Migration, PostgresMigrator};
