//! Field checks shared by the auth forms.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;
pub(crate) const EMAIL_INVALID: &str = "Valid email is required";
pub(crate) const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

/// `local@domain.tld` with no whitespace and a single `@`.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Trimmed email, or the message to show.
pub(crate) fn check_email(value: &str) -> Result<String, &'static str> {
    let email = value.trim();
    if is_valid_email(email) { Ok(email.to_owned()) } else { Err(EMAIL_INVALID) }
}

pub(crate) fn check_password(value: &str) -> Result<(), &'static str> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    Ok(())
}
