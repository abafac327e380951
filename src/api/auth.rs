use axum::{
    Form,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppError, AppState, validation};

const SESSION_USER_ID: &str = "user_id";
const SESSION_USERNAME: &str = "username";

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for pass-creation routes: anonymous requests are redirected to the
/// login entry point instead of receiving an error page.
pub async fn require_login(session: Session, request: Request, next: Next) -> Response {
    match session.get::<String>(SESSION_USERNAME).await {
        Ok(Some(username)) => {
            tracing::Span::current().record("user", &username);
            next.run(request).await
        }
        _ => Redirect::to("/login").into_response(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /login
/// Verify credentials; on success establish the session and move on to
/// pass creation.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    let username = validation::require_field(&form.username, "username")?;
    validation::require_password(&form.password)?;

    let user = state
        .store
        .verify_user(username, &form.password)
        .await
        .map_err(|e| AppError::internal(format!("Authentication error: {e}")))?
        .ok_or(AppError::AuthenticationFailed)?;

    session
        .insert(SESSION_USER_ID, user.id)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USERNAME, &user.username)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!("Teacher logged in: {}", user.username);

    Ok(Redirect::to("/create_outing_pass"))
}

/// POST /register
/// Create a teacher account, then send the browser to the login page.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    let username = validation::require_field(&form.username, "username")?;
    validation::require_password(&form.password)?;

    let user = state
        .store
        .register_user(username, &form.password)
        .await
        .map_err(|e| AppError::internal(format!("Registration error: {e}")))?
        .ok_or_else(|| AppError::DuplicateUsername(username.to_string()))?;

    tracing::info!("Teacher registered: {}", user.username);

    Ok(Redirect::to("/login"))
}

/// GET /logout
pub async fn logout(session: Session) -> Redirect {
    let _ = session.flush().await;
    Redirect::to("/")
}

// ============================================================================
// Helpers
// ============================================================================

/// Get username from session, returns error if not authenticated
pub async fn session_username(session: &Session) -> Result<String, AppError> {
    session
        .get::<String>(SESSION_USERNAME)
        .await
        .map_err(|e| AppError::internal(format!("Session error: {e}")))?
        .ok_or(AppError::AuthenticationFailed)
}
