use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::fs;
use tower_sessions::Session;

use super::{render_flash, USER_SESSION_KEY};
use crate::config::Config;
use crate::errors::{flash_to, AppError, AppResult};
use crate::models::{FlashQuery, RegisterForm, SignInForm, User};
use crate::services::RedisService;

pub async fn serve_home_page(session: Session) -> AppResult<Response> {
    let home_html = fs::read_to_string("templates/index.html").map_err(|e| {
        tracing::error!("Failed to read home template: {}", e);
        AppError::File(e)
    })?;

    // The navigation flips between sign-in links and the profile link
    // depending on whether a session is active.
    let nav = if session.get::<String>(USER_SESSION_KEY).await?.is_some() {
        r#"<a href="/profile">Profile</a> <a href="/logout">Sign out</a>"#
    } else {
        r#"<a href="/signin">Sign in</a> <a href="/register">Register</a>"#
    };

    Ok(Html(home_html.replace("{{nav}}", nav)).into_response())
}

pub async fn serve_signin_page(Query(query): Query<FlashQuery>) -> AppResult<Response> {
    let signin_html = fs::read_to_string("templates/signin.html").map_err(|e| {
        tracing::error!("Failed to read signin template: {}", e);
        AppError::File(e)
    })?;

    Ok(Html(render_flash(signin_html, query.error)).into_response())
}

pub async fn serve_register_page(Query(query): Query<FlashQuery>) -> AppResult<Response> {
    let register_html = fs::read_to_string("templates/register.html").map_err(|e| {
        tracing::error!("Failed to read register template: {}", e);
        AppError::File(e)
    })?;

    Ok(Html(render_flash(register_html, query.error)).into_response())
}

#[axum::debug_handler]
pub async fn handle_register(
    State((redis_service, config)): State<(RedisService, Config)>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() {
        return Ok(flash_to("/register", "All fields are required"));
    }
    if form.login.len() < config.auth.min_login_len {
        return Ok(flash_to(
            "/register",
            &format!(
                "Login must be at least {} characters long",
                config.auth.min_login_len
            ),
        ));
    }
    if form.password.len() < config.auth.min_password_len {
        return Ok(flash_to(
            "/register",
            &format!(
                "Password must be at least {} characters long",
                config.auth.min_password_len
            ),
        ));
    }

    if redis_service.get_user_by_name(&form.name).await?.is_some() {
        return Err(AppError::DuplicateName);
    }
    if redis_service.get_user_by_email(&form.email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }
    if form.password != form.repeat_password {
        return Err(AppError::PasswordMismatch);
    }

    // The login code gets the same one-way treatment as the password.
    let login_hash = hash(form.login.as_bytes(), DEFAULT_COST)?;
    let password_hash = hash(form.password.as_bytes(), DEFAULT_COST)?;
    let user = User::new(form.name, form.email, login_hash, password_hash);

    redis_service.create_user(&user).await?;
    session.insert(USER_SESSION_KEY, &user.id).await?;

    tracing::info!("Registered new user: {}", user.name);
    Ok(Redirect::to("/profile").into_response())
}

#[axum::debug_handler]
pub async fn handle_signin(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> AppResult<Response> {
    let user = redis_service
        .get_user_by_email(&form.email)
        .await?
        .ok_or(AppError::UnknownEmail)?;

    if !verify(form.login.as_bytes(), &user.login_hash)? {
        return Err(AppError::InvalidLogin);
    }
    // The password is only checked once the login code verified.
    if !verify(form.password.as_bytes(), &user.password_hash)? {
        return Err(AppError::InvalidPassword);
    }

    session.insert(USER_SESSION_KEY, &user.id).await?;

    tracing::info!("User signed in: {}", user.name);
    Ok(Redirect::to("/profile").into_response())
}

#[axum::debug_handler]
pub async fn handle_logout(session: Session) -> AppResult<Response> {
    session.remove::<String>(USER_SESSION_KEY).await?;
    Ok(Redirect::to("/").into_response())
}
