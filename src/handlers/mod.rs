mod auth;
mod profile;
mod wizard;

pub use auth::{
    handle_logout, handle_register, handle_signin, serve_home_page, serve_register_page,
    serve_signin_page,
};
pub use profile::{delete_plan, mark_item_done, serve_profile};
pub use wizard::{
    choose_kind, serve_count_page, serve_item_page, serve_kind_page, submit_count, submit_item,
};

use tower_sessions::Session;

use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::services::RedisService;

/// Session key holding the signed-in user's id.
pub const USER_SESSION_KEY: &str = "user_session";

/// Resolves the signed-in user behind the session. The auth middleware
/// already redirects anonymous requests, but handlers still fail with
/// the typed error if the session or the record went away in between.
async fn current_user(redis_service: &RedisService, session: &Session) -> AppResult<User> {
    let user_id = session
        .get::<String>(USER_SESSION_KEY)
        .await?
        .ok_or(AppError::Unauthorized)?;

    redis_service
        .get_user_by_id(&user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Fills the `{{flash}}` slot of a template with the one pending
/// message, or with nothing.
fn render_flash(template: String, message: Option<String>) -> String {
    match message {
        Some(message) => template.replace(
            "{{flash}}",
            &format!(r#"<p class="flash">{}</p>"#, message),
        ),
        None => template.replace("{{flash}}", ""),
    }
}
