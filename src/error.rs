use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::validate::FieldErrors;

/// Domain failures, translated to HTTP at the boundary.
///
/// 400 for validation and business-rule failures, 401 for a wrong actor,
/// 404 for confirmed absence, 500 for anything unexpected in the store or
/// the hashing/signing primitives.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Not authorized")]
    NotAuthorized,
    #[error("Post already liked")]
    AlreadyLiked,
    #[error("Post not yet liked")]
    NotLiked,
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateEmail
            | ApiError::InvalidCredentials
            | ApiError::AlreadyLiked
            | ApiError::NotLiked => StatusCode::BAD_REQUEST,
            ApiError::NotAuthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errors) => json!(errors),
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                json!({ "error": "Internal server error" })
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal failure");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn status_mapping() {
        let mut errors: FieldErrors = BTreeMap::new();
        errors.insert("text", "Text field is required".into());
        assert_eq!(ApiError::Validation(errors).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AlreadyLiked.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotLiked.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotAuthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("Post").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(ApiError::NotFound("Comment").to_string(), "Comment not found");
    }
}
