use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Handler failure: a status code and a short plain-text message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Request body that is not JSON or does not match the expected shape.
    pub fn bad_body(err: serde_json::Error) -> Self {
        warn!(error = %err, "error decoding JSON request");
        Self::new(StatusCode::BAD_REQUEST, "Invalid request payload")
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Spot not found"),
            ServiceError::Model(m) => Self::new(StatusCode::BAD_REQUEST, m.to_string()),
            ServiceError::Io(err) => {
                error!(error = %err, "error accessing spot file");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to access spot data")
            }
            ServiceError::Decode(err) => {
                error!(error = %err, "error parsing spot file");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to parse spot data")
            }
            ServiceError::Encode(err) => {
                error!(error = %err, "error encoding spot file");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode spot data")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::not_found("spot"), StatusCode::NOT_FOUND),
            (
                ServiceError::Model(models::errors::ModelError::Validation("id".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }

        let decode = serde_json::from_str::<u8>("x").unwrap_err();
        assert_eq!(ApiError::from(ServiceError::Decode(decode)).status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
