use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::errors::AppError;

/// Redirect carrying a single flash message in the `error` query
/// parameter; the target page renders it once.
pub fn flash_to(path: &str, message: &str) -> Response {
    Redirect::to(&format!("{}?error={}", path, urlencoding::encode(message))).into_response()
}

// Every user-facing error lands back on the page where the user can
// act on it; infrastructure failures become server errors.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // Registration problems return to the registration form,
            // except a known email, which sends the user to sign in.
            AppError::DuplicateName | AppError::PasswordMismatch => {
                flash_to("/register", &self.to_string())
            }

            AppError::DuplicateEmail
            | AppError::UnknownEmail
            | AppError::InvalidLogin
            | AppError::InvalidPassword
            | AppError::Unauthorized => flash_to("/signin", &self.to_string()),

            AppError::PlanAlreadyExists => flash_to("/profile", &self.to_string()),

            AppError::InvalidPlanKind | AppError::NoActiveWizard => {
                flash_to("/profile/create", &self.to_string())
            }

            AppError::Session(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Session error: {}", e),
            )
                .into_response(),

            AppError::Redis(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
                .into_response(),

            AppError::File(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("File error: {}", e),
            )
                .into_response(),

            AppError::Hash(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hashing error: {}", e),
            )
                .into_response(),
        }
    }
}
