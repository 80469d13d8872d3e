// Copyright 2023 Remi Bernotavicius

use crate::{Error, Result};
use diesel::prelude::Connection as _;
use diesel::RunQueryDsl as _;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::Path;

pub mod models;
pub mod schema;

pub type Connection = diesel::sqlite::SqliteConnection;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn establish(database_url: &str) -> Result<Connection> {
    let mut connection = Connection::establish(database_url)?;

    // SQLite leaves foreign keys off unless asked; the schema relies on them.
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut connection)?;

    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(Error::Migration)?;
    Ok(connection)
}

pub fn establish_connection(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let database_url = path
        .to_str()
        .ok_or_else(|| Error::InvalidDatabasePath(path.into()))?;
    establish(database_url)
}

#[cfg(test)]
pub fn establish_in_memory_connection() -> Connection {
    establish(":memory:").unwrap()
}
