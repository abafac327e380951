use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppError, AppState, auth, pages, validation};
use crate::db::{NewPass, mint_token};

#[derive(Deserialize)]
pub struct CreatePassForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub ban: String,
}

/// GET /create_outing_pass
pub async fn issue_form(session: Session) -> Result<Html<String>, AppError> {
    let username = auth::session_username(&session).await?;
    Ok(Html(pages::issue_page(&username)))
}

/// POST /create_outing_pass
/// Mint a token, persist the pass, render its QR image, and send the
/// browser to the display page for the new token.
pub async fn create_outing_pass(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<CreatePassForm>,
) -> Result<Redirect, AppError> {
    let name = validation::require_field(&form.name, "name")?;
    let reason = validation::require_field(&form.reason, "reason")?;
    let expiry_date = validation::require_field(&form.expiry_date, "expiry_date")?;
    let ban = validation::require_field(&form.ban, "ban")?;

    // The issuer comes from the session, never from the form.
    let teacher = auth::session_username(&session).await?;

    let pass = NewPass {
        name: name.to_string(),
        issue_date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        reason: reason.to_string(),
        expiry_date: expiry_date.to_string(),
        teacher,
        ban: ban.to_string(),
        unique_id: mint_token(),
    };

    let stored = state
        .store
        .insert_pass(pass)
        .await
        .map_err(|e| AppError::internal(format!("Failed to persist outing pass: {e}")))?;

    state
        .qr
        .generate(&stored)
        .await
        .map_err(|e| AppError::internal(format!("Failed to render QR image: {e}")))?;

    tracing::info!(
        token = %stored.unique_id,
        teacher = %stored.teacher,
        "Outing pass issued"
    );

    Ok(Redirect::to(&format!("/outing_pass/{}", stored.unique_id)))
}

/// GET `/outing_pass/{token}`
/// Public verification view; unknown tokens render the invalid-pass page.
pub async fn display_outing_pass(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Html<String>, AppError> {
    if !validation::is_token_shaped(&token) {
        return Err(AppError::pass_not_found());
    }

    let pass = state
        .store
        .find_pass_by_token(&token)
        .await
        .map_err(|e| AppError::internal(format!("Failed to look up outing pass: {e}")))?
        .ok_or_else(AppError::pass_not_found)?;

    Ok(Html(pages::pass_page(&pass)))
}
