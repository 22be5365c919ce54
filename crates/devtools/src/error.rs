use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] devtools_core::Error),

    #[error("{}", .0.body_text())]
    Request(#[from] JsonRejection),
}

impl Error {
    /// HTTP status the REST layer answers with
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(devtools_core::Error::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Core(_) => StatusCode::BAD_REQUEST,
            Error::Request(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        log::warn!("Request failed with {status}: {self}");

        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}
