//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_serialises_as_plain_string() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(serde_json::to_value(&id).expect("serialise"), json!(VALID_ID));
    let decoded: UserId = serde_json::from_value(json!(VALID_ID)).expect("deserialise");
    assert_eq!(decoded, id);
}

#[rstest]
fn username_is_trimmed() {
    let username = Username::new("  ada  ").expect("valid username");
    assert_eq!(username.as_ref(), "ada");
}

#[rstest]
#[case("   ", UserValidationError::EmptyUsername)]
fn username_rejects_blank(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_rejects_overlong_values() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(&raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
#[case("ada@example.com")]
#[case("  ada.lovelace@mail.example.org ")]
fn email_accepts_plausible_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw.trim());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("ada", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("ada@localhost", UserValidationError::InvalidEmail)]
#[case("ada@@example.com", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
#[case("ada@example.", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_addresses(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn try_from_strings_assembles_user() {
    let user = User::try_from_strings(VALID_ID, "ada", "ada@example.com").expect("valid user");
    assert_eq!(user.id().to_string(), VALID_ID);
    assert_eq!(user.username().as_ref(), "ada");
    assert_eq!(user.email().as_ref(), "ada@example.com");
}
