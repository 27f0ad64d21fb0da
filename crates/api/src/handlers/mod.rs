//! Request handlers, one module per resource.

pub mod chapter;
pub mod comic_blog;
pub mod user;

use infocomic_core::error::CoreError;

use crate::error::AppError;

/// Return `value` trimmed, or a validation error naming `field`.
pub(crate) fn required(field: &str, value: Option<&str>) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "{field} is required"
        )))),
    }
}
