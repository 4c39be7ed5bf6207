use actix_web::{
    error::{self, BlockingError, ResponseError},
    HttpRequest, HttpResponse,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Body of successful mutations that have nothing else to return.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct OkResp {
    pub ok: bool,
}

impl OkResp {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResp {
    fn default() -> Self {
        Self::new()
    }
}

/// Semantic error types with proper HTTP status code mapping
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApiError {
    pub fn invalid_input(msg: &str) -> Self {
        ApiError::InvalidInput(msg.to_string())
    }

    /// Not-found error for a missing glossary term.
    pub fn term_not_found(term: &str) -> Self {
        ApiError::NotFound(format!("Term '{}' not found", term))
    }

    fn to_error_resp(&self) -> ErrorResp {
        ErrorResp {
            detail: self.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        HttpResponse::build(status_code).json(self.to_error_resp())
    }
}

// Convert Diesel errors to semantic API errors
impl From<DieselError> for ApiError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => {
                    ApiError::Conflict("Resource already exists".to_string())
                }
                _ => ApiError::DatabaseError(info.message().to_string()),
            },
            _ => ApiError::InternalError("An unexpected error occurred".to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for ApiError {
    fn from(error: diesel::r2d2::PoolError) -> Self {
        ApiError::InternalError(format!("could not get db connection from pool: {}", error))
    }
}

impl From<BlockingError> for ApiError {
    fn from(error: BlockingError) -> Self {
        ApiError::InternalError(format!("Blocking error: {}", error))
    }
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Error, Deserialize, Serialize)]
pub struct ErrorResp {
    pub detail: String,
}

impl ErrorResp {
    pub fn new(detail: &str) -> Self {
        Self {
            detail: detail.to_string(),
        }
    }
}

impl Display for ErrorResp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

/// Malformed JSON bodies: 415 for a wrong content type, 400 otherwise.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    use actix_web::error::JsonPayloadError;

    let detail = ErrorResp::new(&err.to_string());
    let resp = match &err {
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType().json(detail),
        _ => HttpResponse::BadRequest().json(detail),
    };
    error::InternalError::from_response(err, resp).into()
}

pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    let resp = HttpResponse::BadRequest().json(ErrorResp::new(&err.to_string()));
    error::InternalError::from_response(err, resp).into()
}

pub fn form_error_handler(err: error::UrlencodedError, _req: &HttpRequest) -> error::Error {
    let resp = HttpResponse::BadRequest().json(ErrorResp::new(&err.to_string()));
    error::InternalError::from_response(err, resp).into()
}

/// Failed `validator` checks (and bodies that do not parse) on validated extractors.
pub fn validation_error_handler(
    err: actix_web_validator::Error,
    _req: &HttpRequest,
) -> error::Error {
    let resp = HttpResponse::BadRequest().json(ErrorResp::new(&err.to_string()));
    error::InternalError::from_response(err, resp).into()
}
