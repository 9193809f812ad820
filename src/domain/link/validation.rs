//! Link field validation

use thiserror::Error;

/// Maximum stored URL length
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum stored title length
pub const MAX_TITLE_LENGTH: usize = 512;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkValidationError {
    #[error("URL must start with http:// or https://")]
    InvalidScheme,

    #[error("URL must not exceed {MAX_URL_LENGTH} characters")]
    UrlTooLong,

    #[error("Title must not exceed {MAX_TITLE_LENGTH} characters")]
    TitleTooLong,
}

/// Validate a bookmark URL
///
/// An invalid URL in this context is any URL not starting with http:// or
/// https://.
pub fn validate_url(url: &str) -> Result<(), LinkValidationError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(LinkValidationError::InvalidScheme);
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(LinkValidationError::UrlTooLong);
    }

    Ok(())
}

/// Validate a link title
pub fn validate_title(title: &str) -> Result<(), LinkValidationError> {
    if title.len() > MAX_TITLE_LENGTH {
        return Err(LinkValidationError::TitleTooLong);
    }

    Ok(())
}
