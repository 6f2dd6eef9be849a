use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::error;

use crate::{config::AppConfig, error::AppError};

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

/// Failure of a single store call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
            _ => StoreError::Database(e),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Logs the cause and collapses it into the client-facing `DatabaseError`.
pub(crate) fn db_failure(op: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |e| {
        error!(error = %e, op, "store call failed");
        AppError::DatabaseError
    }
}
