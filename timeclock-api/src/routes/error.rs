use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::{domain::TimeClockError, repositories::RepositoryError};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<TimeClockError> for ApiError {
    fn from(err: TimeClockError) -> Self {
        match err {
            TimeClockError::JobNotFound
            | TimeClockError::EntryNotFound
            | TimeClockError::NoActiveEntry => Self::not_found(err.to_string()),
            TimeClockError::AlreadyClockedIn => Self::conflict(err.to_string()),
            TimeClockError::InvalidInput(_) => Self::bad_request(err.to_string()),
            TimeClockError::IntegrityViolation { .. } => {
                tracing::error!("Integrity violation: {}", err);
                Self::internal(err.to_string())
            }
            TimeClockError::Repository(repo_err) => repo_err.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                Self::internal("Something went wrong.")
            }
            RepositoryError::CorruptEntry(_) => {
                tracing::error!("{}", err);
                Self::internal("Something went wrong.")
            }
            RepositoryError::NotFound(_) => Self::not_found(err.to_string()),
            RepositoryError::UniqueViolation(_) => Self::conflict(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobId;

    #[test]
    fn domain_errors_map_to_expected_status_codes() {
        let cases: Vec<(TimeClockError, StatusCode)> = vec![
            (TimeClockError::JobNotFound, StatusCode::NOT_FOUND),
            (TimeClockError::EntryNotFound, StatusCode::NOT_FOUND),
            (TimeClockError::NoActiveEntry, StatusCode::NOT_FOUND),
            (TimeClockError::AlreadyClockedIn, StatusCode::CONFLICT),
            (
                TimeClockError::invalid_input("bad"),
                StatusCode::BAD_REQUEST,
            ),
            (
                TimeClockError::IntegrityViolation {
                    job_id: JobId::new(1),
                    count: 2,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }
}
