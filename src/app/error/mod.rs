use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

mod schema;

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// Errors a handler can hand back to the client.
///
/// `ValidationError` carries a message meant for the caller and maps to a
/// 400. Anything else is wrapped in `UnexpectedError`, logged in full, and
/// reported as a generic 500.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::ValidationError(ref s) => {
                tracing::warn!(detail = %s, "rejected request");
                s.to_owned()
            }
            Self::UnexpectedError(ref e) => {
                tracing::error!("{:?}", e);
                "Unexpected error".to_owned()
            }
        };

        (
            self.status_code(),
            Json(schema::Error {
                code: self.status_code().as_u16(),
                message,
            }),
        )
            .into_response()
    }
}
