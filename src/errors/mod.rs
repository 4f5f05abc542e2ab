use thiserror::Error;

pub mod response;

pub use response::flash_to;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("This name is already in use")]
    DuplicateName,

    #[error("You've already signed up with that email, sign in instead")]
    DuplicateEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("That email does not exist, please try again")]
    UnknownEmail,

    #[error("Login incorrect, please try again")]
    InvalidLogin,

    #[error("Password incorrect, please try again")]
    InvalidPassword,

    #[error("Please sign in first")]
    Unauthorized,

    #[error("You already have a plan")]
    PlanAlreadyExists,

    #[error("Choose either the day or the month plan")]
    InvalidPlanKind,

    #[error("Start a new plan first")]
    NoActiveWizard,

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    // RedisError converts via the From impl generated by #[from].
    #[error("Database error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
