use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use std::fs;
use tower_sessions::Session;

use super::{current_user, render_flash};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{FlashQuery, PlanStatus};
use crate::services::RedisService;

const NO_PLAN_HTML: &str = r#"<p>You have no plan right now.</p>
        <p><a href="/profile/create" class="button">Create a plan</a></p>"#;

pub async fn serve_profile(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Query(query): Query<FlashQuery>,
) -> AppResult<Response> {
    let mut user = current_user(&redis_service, &session).await?;
    let now = Local::now().naive_local();
    let mut notice = query.error;

    // A deadline in the past means the plan is over: clear the stored
    // fields so the record never keeps items without a live deadline,
    // and tell the user once.
    if matches!(user.plan_status(now), PlanStatus::Expired) {
        user.clear_plan();
        redis_service.save_user(&user).await?;
        notice = Some("You did not complete the plan in time".to_string());
        tracing::info!("Plan expired for user: {}", user.name);
    }

    let plan_html = match user.plan_status(now) {
        PlanStatus::Active(plan) => {
            let items = plan
                .items
                .iter()
                .map(|item| format!("            <li>{}</li>", item))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                r#"<p>Your {} plan runs until {}.</p>
        <p>{} item(s) left, front one first:</p>
        <ol>
{}
        </ol>
        <p><a href="/done" class="button">First item done</a>
        <a href="/delete" class="button danger">Delete plan</a></p>"#,
                plan.kind.as_str(),
                plan.time_final.format("%Y-%m-%d %H:%M"),
                plan.items.len(),
                items,
            )
        }
        _ => NO_PLAN_HTML.to_string(),
    };

    let profile_html = fs::read_to_string("templates/profile.html").map_err(|e| {
        tracing::error!("Failed to read profile template: {}", e);
        AppError::File(e)
    })?;

    let profile_html = profile_html
        .replace("{{name}}", &user.name)
        .replace("{{plan}}", &plan_html);

    Ok(Html(render_flash(profile_html, notice)).into_response())
}

#[axum::debug_handler]
pub async fn mark_item_done(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
) -> AppResult<Response> {
    let mut user = current_user(&redis_service, &session).await?;

    if let Some(done) = user.complete_first_item() {
        tracing::info!("User {} finished item: {}", user.name, done);
        redis_service.save_user(&user).await?;
    }

    Ok(Redirect::to("/profile").into_response())
}

#[axum::debug_handler]
pub async fn delete_plan(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
) -> AppResult<Response> {
    let mut user = current_user(&redis_service, &session).await?;

    user.clear_plan();
    redis_service.save_user(&user).await?;

    tracing::info!("User {} deleted their plan", user.name);
    Ok(Redirect::to("/profile").into_response())
}
