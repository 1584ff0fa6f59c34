use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snafu::IntoError as _;

use crate::auth::AuthError;
use crate::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ApiError {
    #[snafu(display("{message}"))]
    Validation {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{}", source.body_text()))]
    MalformedBody {
        source: JsonRejection,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{what} not found"))]
    NotFound {
        what: &'static str,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("expected username to be unique"))]
    UsernameTaken {
        username: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{source}"))]
    Unauthorized {
        source: AuthError,
        #[snafu(implicit)]
        location: Location,
    },

    /// The credentials could not be checked or a token could not be signed.
    #[snafu(display("failed to start a session"))]
    Session {
        source: AuthError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("token refers to a user that no longer exists"))]
    UnknownUser {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to access the database"))]
    Database {
        source: DatabaseQueryError,
        #[snafu(implicit)]
        location: Location,
    },
}

impl Located for ApiError {
    fn location(&self) -> Location {
        match self {
            ApiError::Validation { location, .. }
            | ApiError::MalformedBody { location, .. }
            | ApiError::NotFound { location, .. }
            | ApiError::UsernameTaken { location, .. }
            | ApiError::Unauthorized { location, .. }
            | ApiError::Session { location, .. }
            | ApiError::UnknownUser { location, .. }
            | ApiError::Database { location, .. } => *location,
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::MalformedBody { .. } | ApiError::UsernameTaken { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unauthorized { .. } | ApiError::UnknownUser { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Session { .. } | ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        MalformedBodySnafu.into_error(rejection)
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, location = %self.location(), "request failed");
        } else {
            tracing::debug!(error = %self, location = %self.location(), "request rejected");
        }

        let content = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(content)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        let validation = ValidationSnafu {
            message: "url or title missing",
        }
        .build();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "url or title missing");

        let missing = NotFoundSnafu { what: "blog" }.build();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "blog not found");

        let taken = UsernameTakenSnafu { username: "root" }.build();
        assert_eq!(taken.status_code(), StatusCode::BAD_REQUEST);
        assert!(taken.to_string().contains("expected username to be unique"));
    }

    #[test]
    fn bad_login_is_unauthorized() {
        let error: Result<(), AuthError> = crate::auth::InvalidLoginSnafu { username: "root" }.fail();
        let error = error.context(UnauthorizedSnafu).unwrap_err();

        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.to_string(), "invalid username or password");
    }

    #[test]
    fn signing_failure_is_a_server_error() {
        let error: Result<(), AuthError> = crate::auth::ExtractTokenSnafu.fail();
        let error = error.context(SessionSnafu).unwrap_err();

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "failed to start a session");
    }
}
