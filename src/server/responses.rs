//! Response envelope and error mapping shared by every API route.
//!
//! Success bodies look like `{"data": ..., "message": "..."}`, failures like
//! `{"error": "..."}`.

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

use crate::store_error::{ResourceKind, StoreError};

#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn ok<T: Serialize>(data: T, message: &str) -> Response {
    respond(StatusCode::OK, data, message)
}

pub fn created<T: Serialize>(data: T, message: &str) -> Response {
    respond(StatusCode::CREATED, data, message)
}

/// Message-only envelope, used by deletions.
pub fn done(message: &str) -> Response {
    let body: Envelope<()> = Envelope {
        data: None,
        message: Some(message.to_string()),
    };
    Json(body).into_response()
}

fn respond<T: Serialize>(status: StatusCode, data: T, message: &str) -> Response {
    let body = Envelope {
        data: Some(data),
        message: Some(message.to_string()),
    };
    (status, Json(body)).into_response()
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// The body could not be parsed or bound; carries the parser's message.
    InvalidInput(String),
    NotFound(ResourceKind),
    StorageFailure,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidInput(message) => message.clone(),
            ApiError::NotFound(kind) => format!("{} not found", kind),
            ApiError::StorageFailure => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(kind) => ApiError::NotFound(kind),
            StoreError::Invalid(message) => ApiError::InvalidInput(message),
            err => {
                error!("Storage failure: {}", err);
                ApiError::StorageFailure
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type ApiResult = Result<Response, ApiError>;

/// JSON body extractor that rejects with the uniform error envelope.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::InvalidInput(rejection.body_text())),
        }
    }
}
