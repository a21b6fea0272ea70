//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected input, whether it failed a domain constructor or never made
//! it past an extractor, is reported as `invalid_request` with a `details`
//! object naming the offending field and a machine-readable code.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::{Value, json};

use crate::domain::{Error, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    EmptyUsername,
    UsernameTooLong,
    UsernameContainsNul,
    AgeOutOfRange,
    AgeNotPositive,
    InvalidGender,
    InvalidBody,
    InvalidQuery,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::UsernameTooLong => "username_too_long",
            ErrorCode::UsernameContainsNul => "username_contains_nul",
            ErrorCode::AgeOutOfRange => "age_out_of_range",
            ErrorCode::AgeNotPositive => "age_not_positive",
            ErrorCode::InvalidGender => "invalid_gender",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

const ID: FieldName = FieldName::new("id");
const USERNAME: FieldName = FieldName::new("username");
const AGE: FieldName = FieldName::new("age");
const GENDER: FieldName = FieldName::new("gender");
const BODY: FieldName = FieldName::new("body");
const QUERY: FieldName = FieldName::new("query");
const PATH: FieldName = FieldName::new("path");

/// Builder for validation errors with field context.
struct ValidationError {
    field: FieldName,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// Map a domain validation failure to an `invalid_request` error.
pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    let message = err.to_string();
    match err {
        UserValidationError::IdNotPositive { value } => {
            ValidationError::new(ID, message).with_value(ErrorCode::InvalidId, value)
        }
        UserValidationError::EmptyUsername => {
            ValidationError::new(USERNAME, message).with_code(ErrorCode::EmptyUsername)
        }
        UserValidationError::UsernameTooLong { .. } => {
            ValidationError::new(USERNAME, message).with_code(ErrorCode::UsernameTooLong)
        }
        UserValidationError::UsernameContainsNul => {
            ValidationError::new(USERNAME, message).with_code(ErrorCode::UsernameContainsNul)
        }
        UserValidationError::AgeOutOfRange { value, .. } => {
            ValidationError::new(AGE, message).with_value(ErrorCode::AgeOutOfRange, value)
        }
        UserValidationError::SearchAgeNotPositive { value } => {
            ValidationError::new(AGE, message).with_value(ErrorCode::AgeNotPositive, value)
        }
        UserValidationError::UnknownGender { value } => {
            ValidationError::new(GENDER, message).with_value(ErrorCode::InvalidGender, value)
        }
    }
}

fn body_error(err: &JsonPayloadError) -> Error {
    ValidationError::new(BODY, format!("invalid JSON body: {err}"))
        .with_code(ErrorCode::InvalidBody)
}

fn query_error(err: &QueryPayloadError) -> Error {
    ValidationError::new(QUERY, format!("invalid query parameters: {err}"))
        .with_code(ErrorCode::InvalidQuery)
}

fn path_error(err: &PathError) -> Error {
    ValidationError::new(PATH, format!("invalid path parameter: {err}"))
        .with_code(ErrorCode::InvalidPath)
}

/// JSON extractor configuration reporting malformed bodies as 422.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| actix_web::Error::from(body_error(&err)))
}

/// Query extractor configuration reporting missing or mistyped parameters
/// as 422.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req: &HttpRequest| actix_web::Error::from(query_error(&err)))
}

/// Path extractor configuration reporting non-integer ids as 422.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req: &HttpRequest| actix_web::Error::from(path_error(&err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Age, Gender, SearchAge, UserId, Username};
    use rstest::rstest;

    fn details_of(error: &Error) -> (&str, &str) {
        let details = error.details().expect("details present");
        (
            details["field"].as_str().expect("field is a string"),
            details["code"].as_str().expect("code is a string"),
        )
    }

    #[rstest]
    #[case(UserId::new(0).expect_err("invalid id"), "id", "invalid_id")]
    #[case(Username::new("").expect_err("empty"), "username", "empty_username")]
    #[case(Username::new("x".repeat(51)).expect_err("long"), "username", "username_too_long")]
    #[case(Username::new("a\0b").expect_err("nul"), "username", "username_contains_nul")]
    #[case(Age::new(121).expect_err("old"), "age", "age_out_of_range")]
    #[case(SearchAge::new(0).expect_err("zero"), "age", "age_not_positive")]
    #[case("other".parse::<Gender>().expect_err("unknown"), "gender", "invalid_gender")]
    fn domain_failures_name_the_field(
        #[case] err: UserValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = map_user_validation_error(err);

        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(details_of(&error), (field, code));
    }

    #[rstest]
    fn rejected_values_are_echoed() {
        let error = map_user_validation_error(Age::new(-1).expect_err("negative"));
        let details = error.details().expect("details present");
        assert_eq!(details["value"], json!(-1));
    }

    #[rstest]
    fn message_comes_from_domain_display() {
        let err = "other".parse::<Gender>().expect_err("unknown");
        let expected = err.to_string();
        assert_eq!(map_user_validation_error(err).message(), expected);
    }
}
