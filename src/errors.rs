use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::encoding::EncodeError;

#[derive(Debug, Error)]
pub enum NegotiateError {
    /// The negotiator has no registered encoders. This is a setup bug, not a
    /// per-request failure.
    #[error("no encoders present, register them with ContentNegotiator::add_encoder")]
    NoEncoders,
    #[error("invalid content type `{0}`")]
    InvalidContentType(String),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal error")]
    Internal { code: &'static str, message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl AppError {
    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
        }
    }
}

impl From<NegotiateError> for AppError {
    fn from(err: NegotiateError) -> Self {
        match err {
            NegotiateError::Encode(err) => Self::internal("serialization_failed", err.to_string()),
            err => Self::internal("negotiator_misconfigured", err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Internal { code, message } => {
                tracing::error!(code, error = %message, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                message,
                details: json!({}),
            }),
        )
            .into_response()
    }
}
