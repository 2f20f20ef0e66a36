use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub type ApiResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            log_app_error(&self, status);
        }
        let (AppError::BadRequest(message)
        | AppError::NotFound(message)
        | AppError::Internal(message)) = self;
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{body, http::StatusCode, response::IntoResponse};

    use crate::error::AppError;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn errors_render_as_plain_text() {
        assert_eq!(
            render(AppError::bad_request("Invalid Due Date")).await,
            (StatusCode::BAD_REQUEST, "Invalid Due Date".to_string())
        );
        assert_eq!(
            render(AppError::not_found("Todo Not Found")).await,
            (StatusCode::NOT_FOUND, "Todo Not Found".to_string())
        );
        assert_eq!(
            render(AppError::internal("Internal Server Error")).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string()
            )
        );
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    tracing::error!(status = status.as_u16(), message = %err.message(), "request failed");
}

pub(crate) fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
