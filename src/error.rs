use crate::{db::dao::DaoLayerError, validation::ValidationError};

pub const NOT_FOUND_MESSAGE: &str = "Todo Not Found";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                message.as_str()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => AppError::not_found(NOT_FOUND_MESSAGE),
            DaoLayerError::Query(err) => err.into(),
            DaoLayerError::Db(err) => {
                tracing::error!(error = %err, "store call failed");
                AppError::internal(INTERNAL_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::AppError;
    use crate::{
        db::dao::DaoLayerError,
        validation::{TodoField, ValidationError},
    };

    #[test]
    fn store_failures_hide_driver_details() {
        let err: AppError = DaoLayerError::Db(DbErr::Custom("disk I/O error".to_string())).into();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.message(), "Internal Server Error");
    }

    #[test]
    fn missing_rows_become_not_found() {
        let err: AppError = DaoLayerError::NotFound {
            entity: "todo",
            id: 7,
        }
        .into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.message(), "Todo Not Found");
    }

    #[test]
    fn validation_failures_keep_their_message() {
        let err: AppError = ValidationError::InvalidFieldValue(TodoField::Status).into();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Invalid Todo Status");

        let err: AppError = DaoLayerError::Query(ValidationError::EmptyUpdate).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
