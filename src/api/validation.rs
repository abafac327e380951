use super::AppError;

/// Require a non-blank form field, returning its trimmed value.
pub fn require_field<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(trimmed)
}

pub fn require_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }
    Ok(())
}

/// Minted tokens are 32 hex chars; anything else can be rejected without
/// touching the store.
#[must_use]
pub fn is_token_shaped(token: &str) -> bool {
    token.len() == 32 && token.chars().all(|c| c.is_ascii_hexdigit())
}
