use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use std::fs;
use tower_sessions::Session;

use super::{current_user, render_flash};
use crate::config::Config;
use crate::errors::{flash_to, AppError, AppResult};
use crate::models::{
    CountForm, FlashQuery, ItemForm, PlanKind, PlanKindForm, WizardState, WIZARD_SESSION_KEY,
};
use crate::services::RedisService;

pub async fn serve_kind_page(Query(query): Query<FlashQuery>) -> AppResult<Response> {
    let kind_html = fs::read_to_string("templates/plan_kind.html").map_err(|e| {
        tracing::error!("Failed to read plan kind template: {}", e);
        AppError::File(e)
    })?;

    Ok(Html(render_flash(kind_html, query.error)).into_response())
}

#[axum::debug_handler]
pub async fn choose_kind(session: Session, Form(form): Form<PlanKindForm>) -> AppResult<Response> {
    // Only the two known kinds pass; anything else stays on the chooser.
    let kind = PlanKind::parse(&form.plan).ok_or(AppError::InvalidPlanKind)?;

    session
        .insert(WIZARD_SESSION_KEY, WizardState::new(kind))
        .await?;

    tracing::debug!("Plan wizard started with kind: {}", kind.as_str());
    Ok(Redirect::to("/profile/create/count").into_response())
}

pub async fn serve_count_page(
    session: Session,
    Query(query): Query<FlashQuery>,
) -> AppResult<Response> {
    let wizard: WizardState = session
        .get(WIZARD_SESSION_KEY)
        .await?
        .ok_or(AppError::NoActiveWizard)?;

    let count_html = fs::read_to_string("templates/plan_count.html").map_err(|e| {
        tracing::error!("Failed to read plan count template: {}", e);
        AppError::File(e)
    })?;

    let count_html = count_html.replace("{{kind}}", wizard.kind.as_str());
    Ok(Html(render_flash(count_html, query.error)).into_response())
}

#[axum::debug_handler]
pub async fn submit_count(
    State((_, config)): State<(RedisService, Config)>,
    session: Session,
    Form(form): Form<CountForm>,
) -> AppResult<Response> {
    let mut wizard: WizardState = session
        .get(WIZARD_SESSION_KEY)
        .await?
        .ok_or(AppError::NoActiveWizard)?;

    let count = match form.number.trim().parse::<u8>() {
        Ok(n) if (1..=config.plan.max_items).contains(&n) => n,
        _ => {
            return Ok(flash_to(
                "/profile/create/count",
                &format!("Enter a number between 1 and {}", config.plan.max_items),
            ));
        }
    };

    wizard.set_count(count);
    session.insert(WIZARD_SESSION_KEY, &wizard).await?;

    Ok(Redirect::to("/profile/create/items").into_response())
}

pub async fn serve_item_page(
    session: Session,
    Query(query): Query<FlashQuery>,
) -> AppResult<Response> {
    let wizard: WizardState = session
        .get(WIZARD_SESSION_KEY)
        .await?
        .ok_or(AppError::NoActiveWizard)?;

    if !wizard.is_collecting() {
        // No target count yet, back to the count form.
        return Ok(Redirect::to("/profile/create/count").into_response());
    }

    let item_html = fs::read_to_string("templates/plan_items.html").map_err(|e| {
        tracing::error!("Failed to read plan items template: {}", e);
        AppError::File(e)
    })?;

    let entered = wizard
        .items
        .iter()
        .map(|item| format!("            <li>{}</li>", item))
        .collect::<Vec<_>>()
        .join("\n");

    let item_html = item_html
        .replace("{{kind}}", wizard.kind.as_str())
        .replace("{{remaining}}", &wizard.remaining.to_string())
        .replace("{{entered}}", &entered);

    Ok(Html(render_flash(item_html, query.error)).into_response())
}

#[axum::debug_handler]
pub async fn submit_item(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Form(form): Form<ItemForm>,
) -> AppResult<Response> {
    let mut wizard: WizardState = session
        .get(WIZARD_SESSION_KEY)
        .await?
        .ok_or(AppError::NoActiveWizard)?;

    if !wizard.is_collecting() {
        return Ok(Redirect::to("/profile/create/count").into_response());
    }

    let text = form.option.trim();
    if text.is_empty() {
        return Ok(flash_to("/profile/create/items", "Enter a task description"));
    }

    wizard.push_item(text.to_string());

    if wizard.is_collecting() {
        session.insert(WIZARD_SESSION_KEY, &wizard).await?;
        return Ok(Redirect::to("/profile/create/items").into_response());
    }

    // That was the last owed item: the collected buffer becomes the plan.
    finish_wizard(&redis_service, &session, wizard).await
}

/// Commits a fully collected wizard. The wizard leaves the session
/// either way; a user who already has a plan keeps it untouched and
/// the collected items are dropped.
async fn finish_wizard(
    redis_service: &RedisService,
    session: &Session,
    wizard: WizardState,
) -> AppResult<Response> {
    session.remove::<WizardState>(WIZARD_SESSION_KEY).await?;

    let mut user = current_user(redis_service, session).await?;
    let kind = wizard.kind;
    let plan = wizard.into_plan(Local::now().naive_local());

    if user.start_plan(plan).is_err() {
        return Err(AppError::PlanAlreadyExists);
    }
    redis_service.save_user(&user).await?;

    tracing::info!("User {} committed a {} plan", user.name, kind.as_str());
    Ok(Redirect::to("/profile").into_response())
}
