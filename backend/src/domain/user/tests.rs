//! Tests for the user identity model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn valid_id() -> String {
    VALID_ID.to_owned()
}

#[rstest]
#[case::minimum("a".repeat(USERNAME_MIN))]
#[case::maximum("a".repeat(USERNAME_MAX))]
fn accepts_usernames_at_length_boundaries(valid_id: String, #[case] name: String) {
    let user = User::try_from_strings(&valid_id, name.clone()).expect("boundary length is valid");
    assert_eq!(user.username().as_ref(), name);
}

#[rstest]
fn rejects_invalid_uuid() {
    let result = User::try_from_strings("not-a-uuid", "clinician");
    assert!(matches!(result, Err(UserValidationError::InvalidId)));
}

#[rstest]
fn rejects_uuid_with_surrounding_whitespace() {
    let id = format!(" {VALID_ID} ");
    let result = User::try_from_strings(id, "clinician");
    assert!(matches!(result, Err(UserValidationError::InvalidId)));
}

#[rstest]
fn rejects_empty_id() {
    let result = User::try_from_strings("", "clinician");
    assert!(matches!(result, Err(UserValidationError::EmptyId)));
}

#[rstest]
fn rejects_blank_username(valid_id: String) {
    let result = User::try_from_strings(&valid_id, "   ");
    assert!(matches!(result, Err(UserValidationError::EmptyUsername)));
}

#[rstest]
fn rejects_too_short_username(valid_id: String) {
    let result = User::try_from_strings(&valid_id, "ab");
    assert!(matches!(
        result,
        Err(UserValidationError::UsernameTooShort { min }) if min == USERNAME_MIN
    ));
}

#[rstest]
fn rejects_too_long_username(valid_id: String) {
    let result = User::try_from_strings(&valid_id, "a".repeat(USERNAME_MAX + 1));
    assert!(matches!(
        result,
        Err(UserValidationError::UsernameTooLong { max }) if max == USERNAME_MAX
    ));
}

#[rstest]
#[case::dots("dr.lovelace")]
#[case::underscores("dr_lovelace")]
#[case::digits("clinician42")]
fn accepts_permitted_characters(valid_id: String, #[case] name: &str) {
    let user = User::try_from_strings(&valid_id, name).expect("valid username");
    assert_eq!(user.username().as_ref(), name);
}

#[rstest]
#[case::space("dr lovelace")]
#[case::symbol("dr$lovelace")]
#[case::hyphen("dr-lovelace")]
fn rejects_forbidden_characters(valid_id: String, #[case] name: &str) {
    let result = User::try_from_strings(&valid_id, name);
    assert!(matches!(
        result,
        Err(UserValidationError::UsernameInvalidCharacters)
    ));
}

#[rstest]
fn user_id_from_uuid_avoids_round_trip_parse() {
    let uuid = uuid::Uuid::parse_str(VALID_ID).expect("valid UUID");
    let user_id = UserId::from_uuid(uuid);

    assert_eq!(user_id.as_uuid(), &uuid);
    assert_eq!(user_id.as_ref(), VALID_ID);
}

#[rstest]
fn user_id_random_produces_canonical_string() {
    let user_id = UserId::random();
    let reparsed = UserId::new(user_id.as_ref()).expect("canonical form reparses");
    assert_eq!(reparsed, user_id);
}

#[rstest]
fn serde_round_trips_camel_case(valid_id: String) {
    let value = json!({"id": valid_id, "username": "dr.lovelace"});
    let user: User = serde_json::from_value(value).expect("valid payload");
    assert_eq!(user.id().as_ref(), valid_id);
    assert_eq!(user.username().as_ref(), "dr.lovelace");

    let serialised = serde_json::to_value(user).expect("serialise to JSON");
    assert_eq!(
        serialised.get("username").and_then(|v| v.as_str()),
        Some("dr.lovelace")
    );
}

#[rstest]
fn serde_rejects_invalid_payloads(valid_id: String) {
    let bad_username = json!({"id": valid_id, "username": "x"});
    assert!(serde_json::from_value::<User>(bad_username).is_err());

    let bad_id = json!({"id": "nope", "username": "dr.lovelace"});
    assert!(serde_json::from_value::<User>(bad_id).is_err());
}
