//! Error responses shared by every handler.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use bountydesk_core::{AuthError, BountyError, ErrorKind, FeatureError, ReviewError, TicketError};

/// Message returned in place of raw storage errors.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation | ErrorKind::BadRequest | ErrorKind::EmptyInput => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Internal failures are logged and replaced by a generic message.
    fn classify(kind: ErrorKind, err: &dyn std::fmt::Display) -> Self {
        if kind == ErrorKind::Internal {
            error!("Request failed: {}", err);
            Self::new(kind, INTERNAL_MESSAGE)
        } else {
            Self::new(kind, err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            status_for(self.kind),
            Json(ErrorResponse {
                error: self.message,
                kind: self.kind,
            }),
        )
            .into_response()
    }
}

impl From<TicketError> for ApiError {
    fn from(e: TicketError) -> Self {
        Self::classify(e.kind(), &e)
    }
}

impl From<BountyError> for ApiError {
    fn from(e: BountyError) -> Self {
        Self::classify(e.kind(), &e)
    }
}

impl From<ReviewError> for ApiError {
    fn from(e: ReviewError) -> Self {
        Self::classify(e.kind(), &e)
    }
}

impl From<FeatureError> for ApiError {
    fn from(e: FeatureError) -> Self {
        Self::classify(e.kind(), &e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::classify(e.kind(), &e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::Validation, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_for_each_kind() {
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::BadRequest), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::EmptyInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::ExternalService), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_for(ErrorKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_errors_are_not_echoed() {
        let err = ApiError::from(TicketError::Database("disk I/O error at page 7".to_string()));
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_not_found_keeps_message() {
        let err = ApiError::from(TicketError::NotFound("abc".to_string()));
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("abc"));
    }

    #[tokio::test]
    async fn test_response_body_carries_kind() {
        let response = ApiError::new(ErrorKind::BadRequest, "invalid ticket uuid format")
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid ticket uuid format");
        assert_eq!(json["kind"], "bad_request");
    }
}
