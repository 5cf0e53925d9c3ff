pub mod home;
pub mod note;
pub mod admin;
pub mod session;

use crate::utils::error::{ApiError, Result};

/// Column widths from the migrations.
pub const NAME_MAX: usize = 120;
pub const SECTION_PART_MAX: usize = 10;

pub(crate) fn within_length(field: &str, label: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(ApiError::validation(
            field,
            format!("{label} must be at most {max} characters."),
        ));
    }
    Ok(())
}
