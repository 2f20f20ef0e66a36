use sea_orm::DbErr;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i32 },
    #[error(transparent)]
    Query(#[from] ValidationError),
}

pub type DaoResult<T> = Result<T, DaoLayerError>;
