use super::{LexisErr, LexisError};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

impl LexisError {
    pub fn status(&self) -> StatusCode {
        use LexisErr as E;
        use StatusCode as SC;
        match self.error {
            E::Busy => SC::CONFLICT,
            E::DoesNotExist(_) => SC::NOT_FOUND,
            E::Validation(_) | E::InvalidFileName(_) | E::InvalidProvider(_) => {
                SC::UNPROCESSABLE_ENTITY
            }
            E::Segmenter(_)
            | E::Regex(_)
            | E::Interpreter(_)
            | E::IO(_)
            | E::SerdeJson(_)
            | E::Http(_)
            | E::Axum(_) => SC::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response wrapper.
#[derive(Debug, Serialize)]
struct ResponseError<T: Serialize> {
    error_type: ErrorType,
    body: T,
}

impl<T> ResponseError<T>
where
    T: Serialize,
{
    pub fn new(error_type: ErrorType, body: T) -> Self {
        Self { error_type, body }
    }
}

#[derive(Debug, Serialize)]
enum ErrorType {
    Internal,
    Api,
}

impl<T> IntoResponse for ResponseError<T>
where
    T: Serialize,
{
    fn into_response(self) -> axum::response::Response {
        <Json<ResponseError<T>> as IntoResponse>::into_response(Json(self))
    }
}

impl IntoResponse for LexisError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        self.print();

        use ErrorType as ET;
        use LexisErr as LE;

        let message = self.error.to_string();

        match self.error {
            LE::Busy => (status, ResponseError::new(ET::Api, message)).into_response(),

            LE::DoesNotExist(e)
            | LE::InvalidFileName(e)
            | LE::InvalidProvider(e) => (status, ResponseError::new(ET::Api, e)).into_response(),

            LE::Validation(errors) => (status, ResponseError::new(ET::Api, errors)).into_response(),

            LE::SerdeJson(e) => {
                (status, ResponseError::new(ET::Internal, e.to_string())).into_response()
            }

            LE::Segmenter(_) | LE::Regex(_) | LE::Interpreter(_) | LE::IO(_) | LE::Http(_)
            | LE::Axum(_) => (status, "Internal".to_string()).into_response(),
        }
    }
}
