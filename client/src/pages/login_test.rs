use super::*;
use crate::pages::form::{EMAIL_INVALID, PASSWORD_TOO_SHORT};

#[test]
fn validate_login_input_trims_email() {
    assert_eq!(
        validate_login_input("  ada@example.com ", "secret1"),
        Ok(("ada@example.com".to_owned(), "secret1".to_owned()))
    );
}

#[test]
fn validate_login_input_checks_email_first() {
    assert_eq!(validate_login_input("ada", "x"), Err(EMAIL_INVALID));
    assert_eq!(validate_login_input("ada@example.com", "12345"), Err(PASSWORD_TOO_SHORT));
}

#[test]
fn password_is_not_trimmed() {
    assert_eq!(
        validate_login_input("ada@example.com", " pass "),
        Ok(("ada@example.com".to_owned(), " pass ".to_owned()))
    );
}

#[test]
fn pending_message_falls_back_when_blank() {
    let blank = AuthOutcome::Pending { message: "  ".to_owned() };
    assert_eq!(pending_message(&blank), UNVERIFIED);
    let server = AuthOutcome::Pending { message: "Verify your email".to_owned() };
    assert_eq!(pending_message(&server), "Verify your email");
}
