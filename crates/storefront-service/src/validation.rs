//! Field checks shared by several services.

use validator::ValidateEmail;

use storefront_core::error::AppError;

/// Reject blank or malformed email addresses.
pub(crate) fn email(value: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation("Email cannot be empty"));
    }
    if !value.validate_email() {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}

/// Reject a blank value for `field`.
pub(crate) fn not_blank(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
