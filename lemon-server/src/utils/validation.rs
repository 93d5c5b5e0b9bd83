//! Input validation helpers
//!
//! Text limits and the checks shared by the handlers. All failures are
//! 400-class [`AppError`]s.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};

use crate::orders::money;

// ── Text length limits ──────────────────────────────────────────────

/// Menu item titles
pub const MIN_TITLE_LEN: usize = 2;
pub const MAX_TITLE_LEN: usize = 255;

/// Category titles and slugs
pub const MAX_NAME_LEN: usize = 255;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 150;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Largest quantity of one menu item per cart line
pub const MAX_QUANTITY: i64 = 1000;

// ── Validation helpers ──────────────────────────────────────────────

/// Required string: non-blank and within the length limit
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    validate_length(value, field, 1, max_len)
}

/// Character count within `[min, max]`
pub fn validate_length(value: &str, field: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between {min} and {max} characters (got {len})"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::required("title"));
    }
    validate_length(title.trim(), "title", MIN_TITLE_LEN, MAX_TITLE_LEN)
}

/// Price as stored, after range and precision checks
pub fn validate_price(price: Decimal) -> Result<f64, AppError> {
    if !money::is_valid_price(price) {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("Invalid price {price}: must be > 0, <= {} with at most 2 decimals", money::MAX_PRICE),
        )
        .with_detail("field", "price"));
    }
    Ok(money::to_f64(price))
}

pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity must be between 1 and {MAX_QUANTITY} (got {quantity})"),
        )
        .with_detail("field", "quantity"));
    }
    Ok(())
}

/// Minimal shape check; delivery is not verified
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() {
        return Ok(());
    }
    validate_length(email, "email", 3, MAX_EMAIL_LEN)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation(format!("Invalid email address: {email}"))
            .with_detail("field", "email")),
    }
}

/// Slug characters: ASCII letters, digits, `-` and `_`
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    validate_required_text(slug, "slug", MAX_NAME_LEN)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::validation(format!(
            "slug may only contain letters, digits, '-' and '_' (got '{slug}')"
        ))
        .with_detail("field", "slug"));
    }
    Ok(())
}

/// Lowercase ASCII alphanumerics separated by single dashes
///
/// `"Main Course!"` → `"main-course"`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
