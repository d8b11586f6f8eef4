use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};

use crate::domain::validation_error::ValidationError;
use crate::repository::RepositoryError;

#[derive(thiserror::Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("invalid JSON body")]
    MalformedBody(String),
    #[error("invalid query string")]
    MalformedQuery(String),
    #[error("not found")]
    NotFound,
    // Carries the value of the `Allow` header
    #[error("method not allowed")]
    MethodNotAllowed(&'static str),
    // Only the context reaches the client, the cause stays in the logs
    #[error("{1}")]
    UnexpectedError(#[source] RepositoryError, &'static str),
}

impl SubscriptionError {
    /// Keeps `NotFound` distinct and turns every other repository failure into an opaque
    /// error described by `context`.
    pub fn from_repository(err: RepositoryError, context: &'static str) -> Self {
        match err {
            RepositoryError::NotFound => SubscriptionError::NotFound,
            err => {
                tracing::error!("{}: {:?}", context, err);
                SubscriptionError::UnexpectedError(err, context)
            }
        }
    }
}

impl std::fmt::Debug for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionError::MalformedBody(reason)
            | SubscriptionError::MalformedQuery(reason) => {
                write!(f, "{}\nCaused by:\n\t{}", self, reason)
            }
            SubscriptionError::UnexpectedError(err, _) => {
                write!(f, "{}\nCaused by:\n\t{:?}", self, err)
            }
            _ => write!(f, "{}", self),
        }
    }
}

impl ResponseError for SubscriptionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            SubscriptionError::UnexpectedError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        if let SubscriptionError::MethodNotAllowed(allowed) = self {
            response.insert_header((header::ALLOW, *allowed));
        }

        response.json(serde_json::json!({ "error": self.to_string() }))
    }
}
