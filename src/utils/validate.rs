use crate::error::{AppError, AppResult};
use validator::ValidateEmail;

/// Checks that `address` is a syntactically valid email address.
///
/// Used for both the configured sender of the email channel and every
/// recipient passed to it.
pub fn validate_email_address(address: &str) -> AppResult<()> {
    let reason = if address.trim().is_empty() {
        "the address is empty"
    } else if !address.contains('@') {
        "the address must contain an @ sign"
    } else if !address.validate_email() {
        "the address is not a valid email address"
    } else if !has_dotted_domain(address) {
        "the domain must contain a period"
    } else {
        return Ok(());
    };

    Err(AppError::EmailSyntax {
        address: address.to_string(),
        reason: reason.to_string(),
    })
}

/// `validate_email` accepts bare hosts such as `a@b`; delivery needs a
/// qualified domain.
fn has_dotted_domain(address: &str) -> bool {
    address
        .rsplit_once('@')
        .map(|(_, domain)| domain.split('.').count() > 1 && !domain.split('.').any(str::is_empty))
        .unwrap_or(false)
}
