use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::handlers::USER_SESSION_KEY;

pub async fn require_auth(
    session: Session,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    if path == "/" || path == "/signin" || path == "/register" || path.starts_with("/static") {
        return next.run(req).await;
    }

    match session.get::<String>(USER_SESSION_KEY).await {
        Ok(Some(_)) => next.run(req).await,
        _ => Redirect::to("/signin").into_response(),
    }
}
