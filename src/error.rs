// Copyright 2023 Remi Bernotavicius

use crate::database::models::MenuId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("menu {0} not found")]
    MenuNotFound(MenuId),
    #[error("database path {0:?} is not valid UTF-8")]
    InvalidDatabasePath(PathBuf),
    #[error("database error")]
    Database(#[from] diesel::result::Error),
    #[error("failed to open database")]
    Connection(#[from] diesel::result::ConnectionError),
    #[error("failed to run database migrations")]
    Migration(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("failed to write shopping list")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
