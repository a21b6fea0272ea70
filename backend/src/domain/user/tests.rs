//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn ada() -> User {
    let id = UserId::new(7).expect("valid id");
    let user = NewUser::try_from_parts("ada", 36, "female").expect("valid user");
    User::new(id, user)
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(120)]
fn age_accepts_inclusive_bounds(#[case] value: i64) {
    let age = Age::new(value).expect("age within bounds");
    assert_eq!(i64::from(age), value);
}

#[rstest]
#[case(-1)]
#[case(121)]
#[case(i64::MAX)]
fn age_rejects_out_of_range(#[case] value: i64) {
    let err = Age::new(value).expect_err("age out of range");
    assert_eq!(
        err,
        UserValidationError::AgeOutOfRange {
            min: AGE_MIN,
            max: AGE_MAX,
            value,
        }
    );
}

#[rstest]
fn username_accepts_fifty_characters() {
    let name = "a".repeat(USERNAME_MAX);
    let username = Username::new(name.clone()).expect("fifty characters allowed");
    assert_eq!(username.as_ref(), name);
}

#[rstest]
fn username_rejects_fifty_one_characters() {
    let err = Username::new("a".repeat(USERNAME_MAX + 1)).expect_err("too long");
    assert_eq!(
        err,
        UserValidationError::UsernameTooLong {
            max: USERNAME_MAX,
            length: USERNAME_MAX + 1,
        }
    );
}

#[rstest]
fn username_counts_characters_not_bytes() {
    let name = "é".repeat(USERNAME_MAX);
    assert!(name.len() > USERNAME_MAX);
    assert!(Username::new(name).is_ok());
}

#[rstest]
#[case("\0")]
#[case("ada\0")]
#[case("a\0b")]
fn username_rejects_nul_characters(#[case] raw: &str) {
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameContainsNul)
    );
}

#[rstest]
fn username_keeps_other_control_characters() {
    assert!(Username::new("ada\tlovelace").is_ok());
}

#[rstest]
fn username_rejects_empty() {
    assert_eq!(Username::new(""), Err(UserValidationError::EmptyUsername));
}

#[rstest]
#[case("male", Gender::Male)]
#[case("female", Gender::Female)]
fn gender_parses_known_labels(#[case] raw: &str, #[case] expected: Gender) {
    let gender: Gender = raw.parse().expect("known label");
    assert_eq!(gender, expected);
    assert_eq!(gender.to_string(), raw);
}

#[rstest]
#[case("other")]
#[case("Male")]
#[case("")]
fn gender_rejects_unknown_labels(#[case] raw: &str) {
    let err = raw.parse::<Gender>().expect_err("unknown label");
    assert_eq!(
        err,
        UserValidationError::UnknownGender {
            value: raw.to_owned(),
        }
    );
}

#[rstest]
#[case(0)]
#[case(-5)]
fn user_id_rejects_non_positive(#[case] value: i64) {
    assert!(UserId::new(value).is_err());
}

#[rstest]
fn search_age_rejects_zero_that_create_accepts() {
    assert!(Age::new(0).is_ok());
    assert_eq!(
        SearchAge::new(0),
        Err(UserValidationError::SearchAgeNotPositive { value: 0 })
    );
}

#[rstest]
fn search_age_has_no_upper_bound() {
    let age = SearchAge::new(500).expect("search ages are unbounded above");
    assert_eq!(age.value(), 500);
}

#[rstest]
fn apply_updates_only_present_fields(ada: User) {
    let patch = UserPatch::try_from_parts(None, Some(40)).expect("valid patch");
    let updated = ada.clone().apply(&patch);

    assert_eq!(updated.id(), ada.id());
    assert_eq!(updated.username(), ada.username());
    assert_eq!(updated.gender(), ada.gender());
    assert_eq!(updated.age().value(), 40);
}

#[rstest]
fn empty_patch_leaves_user_unchanged(ada: User) {
    let patch = UserPatch::default();
    assert!(patch.is_empty());
    assert_eq!(ada.clone().apply(&patch), ada);
}

#[rstest]
fn patch_validates_present_fields() {
    let err = UserPatch::try_from_parts(Some(String::new()), None).expect_err("empty username");
    assert_eq!(err, UserValidationError::EmptyUsername);
}

#[rstest]
#[case("ada", 36, "female", true)]
#[case("ada", 37, "female", false)]
#[case("Ada", 36, "female", false)]
#[case("ada", 36, "male", false)]
fn criteria_match_on_all_fields(
    ada: User,
    #[case] username: &str,
    #[case] age: i64,
    #[case] gender: &str,
    #[case] expected: bool,
) {
    let criteria = UserSearchCriteria::try_from_parts(username, age, gender).expect("valid criteria");
    assert_eq!(criteria.matches(&ada), expected);
}

#[rstest]
fn serialises_to_flat_json(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": 7, "username": "ada", "age": 36, "gender": "female" })
    );
}

#[rstest]
#[case(json!({ "id": 0, "username": "ada", "age": 36, "gender": "female" }))]
#[case(json!({ "id": 1, "username": "", "age": 36, "gender": "female" }))]
#[case(json!({ "id": 1, "username": "ada", "age": 121, "gender": "female" }))]
#[case(json!({ "id": 1, "username": "ada", "age": 36, "gender": "other" }))]
fn deserialisation_enforces_invariants(#[case] payload: serde_json::Value) {
    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}
