//! # Repository Layer
//!
//! Repositories wrap SeaORM operations for each entity. Input is validated
//! before any statement is sent; storage-level failures are classified by
//! [`RepositoryError`](crate::error::RepositoryError).

pub mod adv_category;
pub mod adv_summary;
pub mod brand;
pub mod category;
pub mod user;

pub use adv_category::AdvCategoryRepository;
pub use adv_summary::{AdvSummaryRepository, CreateAdvSummaryRequest, UpdateAdvSummaryRequest};
pub use brand::BrandRepository;
pub use category::CategoryRepository;
pub use user::UserRepository;

use crate::error::RepositoryError;
use crate::slug::{SLUG_MAX_LENGTH, is_valid_slug};

/// Maximum length of name and description columns
pub const NAME_MAX_LENGTH: usize = 255;

/// Trims `value` and checks it is non-empty and within `max` characters.
pub(crate) fn validate_required_text(
    field: &str,
    value: &str,
    max: usize,
) -> Result<String, RepositoryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepositoryError::validation_error(format!(
            "{field} cannot be empty"
        )));
    }
    validate_max_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

pub(crate) fn validate_max_length(
    field: &str,
    value: &str,
    max: usize,
) -> Result<(), RepositoryError> {
    if value.chars().count() > max {
        return Err(RepositoryError::validation_error(format!(
            "{field} cannot exceed {max} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_slug(field: &str, value: Option<&str>) -> Result<(), RepositoryError> {
    if let Some(slug) = value
        && !is_valid_slug(slug)
    {
        return Err(RepositoryError::validation_error(format!(
            "{field} must be at most {SLUG_MAX_LENGTH} letters, numbers, underscores or hyphens"
        )));
    }
    Ok(())
}
