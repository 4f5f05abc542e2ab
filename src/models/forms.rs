use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub login: String,
    pub password: String,
    pub repeat_password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub login: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanKindForm {
    pub plan: String,
}

// The count arrives as text so a bad value flashes back to the form
// instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct CountForm {
    pub number: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub option: String,
}

/// The one pending flash message, carried in the `error` query
/// parameter of a redirect.
#[derive(Debug, Deserialize)]
pub struct FlashQuery {
    pub error: Option<String>,
}
