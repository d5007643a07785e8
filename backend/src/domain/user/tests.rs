//! Tests for the shop user model.

use super::*;
use rstest::rstest;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
fn user_id_round_trips_through_string() {
    let id = UserId::new(VALID_ID).expect("valid uuid");
    assert_eq!(String::from(id), VALID_ID);
}

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
fn user_id_rejects_malformed_values(#[case] raw: &str) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
#[case("budi@example.com", "budi@example.com")]
#[case("  Budi@Example.COM ", "budi@example.com")]
fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("budi", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("budi@", UserValidationError::InvalidEmail)]
#[case("a@b@c", UserValidationError::InvalidEmail)]
#[case("bu di@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw), Err(expected));
}

#[rstest]
#[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
#[case("   ab   ", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
fn username_too_short(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_too_long() {
    let raw = "x".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
fn username_is_trimmed() {
    let name = Username::new("  siti  ").expect("valid username");
    assert_eq!(name.as_ref(), "siti");
}

#[rstest]
#[case("customer", Role::Customer)]
#[case("ADMIN", Role::Admin)]
#[case(" admin ", Role::Admin)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>(), Ok(expected));
}

#[rstest]
fn unknown_role_is_rejected() {
    let err = "superuser".parse::<Role>().expect_err("unknown role");
    assert_eq!(err.field(), "role");
}

#[rstest]
fn password_digest_is_not_printed() {
    let digest = PasswordDigest::new("$argon2id$v=19$secret");
    assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
}
