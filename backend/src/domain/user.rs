//! User data model and the validation rules guarding it.
//!
//! Every field type validates on construction, so a [`User`] that exists in
//! memory always satisfies the storage invariants: a positive id, a username
//! of 1 to 50 characters, an age within 0 to 120 and one of the two gender
//! labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum allowed username length in characters.
pub const USERNAME_MIN: usize = 1;
/// Maximum allowed username length in characters.
pub const USERNAME_MAX: usize = 50;
/// Youngest age accepted on create and update.
pub const AGE_MIN: i64 = 0;
/// Oldest age accepted on create and update.
pub const AGE_MAX: i64 = 120;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifiers start at 1.
    IdNotPositive { value: i64 },
    /// The username was empty.
    EmptyUsername,
    /// The username exceeded [`USERNAME_MAX`] characters.
    UsernameTooLong { max: usize, length: usize },
    /// The username contained a NUL character, which text columns cannot store.
    UsernameContainsNul,
    /// The age fell outside `[AGE_MIN, AGE_MAX]`.
    AgeOutOfRange { min: i64, max: i64, value: i64 },
    /// Search ages must be strictly positive.
    SearchAgeNotPositive { value: i64 },
    /// The gender label was neither `male` nor `female`.
    UnknownGender { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdNotPositive { value } => {
                write!(f, "user id must be greater than or equal to 1 (got {value})")
            }
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max, length } => {
                write!(f, "username must be at most {max} characters (got {length})")
            }
            Self::UsernameContainsNul => write!(f, "username must not contain NUL characters"),
            Self::AgeOutOfRange { min, max, value } => {
                write!(f, "age must be between {min} and {max} (got {value})")
            }
            Self::SearchAgeNotPositive { value } => {
                write!(f, "age must be greater than 0 (got {value})")
            }
            Self::UnknownGender { value } => {
                write!(f, "gender must be one of: male, female (got {value:?})")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
///
/// Identifiers are positive and never reused once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::UserId;
    ///
    /// assert!(UserId::new(1).is_ok());
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value < 1 {
            return Err(UserValidationError::IdNotPositive { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Username of 1 to 50 characters.
///
/// Length is counted in Unicode scalar values and surrounding whitespace is
/// kept as submitted. U+0000 is rejected because PostgreSQL text columns
/// cannot hold it. Usernames are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::EmptyUsername);
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong {
                max: USERNAME_MAX,
                length,
            });
        }
        if username.contains('\0') {
            return Err(UserValidationError::UsernameContainsNul);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Age in whole years, 0 to 120 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Age(u8);

impl Age {
    /// Validate and construct an [`Age`].
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        let out_of_range = || UserValidationError::AgeOutOfRange {
            min: AGE_MIN,
            max: AGE_MAX,
            value,
        };
        if !(AGE_MIN..=AGE_MAX).contains(&value) {
            return Err(out_of_range());
        }
        u8::try_from(value).map(Self).map_err(|_| out_of_range())
    }

    /// Age in years.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Age> for i64 {
    fn from(value: Age) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age filter accepted by search: strictly positive with no upper bound.
///
/// This is looser than [`Age`] at the top and stricter at the bottom, so a
/// search for `age=0` is rejected even though a user aged 0 can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchAge(i64);

impl SearchAge {
    /// Validate and construct a [`SearchAge`].
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::SearchAgeNotPositive { value });
        }
        Ok(Self(value))
    }

    /// Raw filter value.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }

    /// Whether a stored age equals this filter.
    #[must_use]
    pub fn matches(self, age: Age) -> bool {
        i64::from(age) == self.0
    }
}

/// Gender label. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// `male`
    Male,
    /// `female`
    Female,
}

impl Gender {
    /// Stored and serialised label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UserValidationError;

    /// Parse an exact, case-sensitive label.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(UserValidationError::UnknownGender {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated fields for a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Submitted username.
    pub username: Username,
    /// Submitted age.
    pub age: Age,
    /// Gender, fixed for the life of the record.
    pub gender: Gender,
}

impl NewUser {
    /// Validate raw create inputs.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::NewUser;
    ///
    /// let user = NewUser::try_from_parts("ada", 36, "female").expect("valid user");
    /// assert_eq!(user.age.value(), 36);
    /// assert!(NewUser::try_from_parts("ada", 121, "female").is_err());
    /// ```
    pub fn try_from_parts(
        username: impl Into<String>,
        age: i64,
        gender: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            age: Age::new(age)?,
            gender: gender.parse()?,
        })
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` is positive and assigned by the store.
/// - `gender` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    username: Username,
    age: Age,
    gender: Gender,
}

impl User {
    /// Build a stored user from its assigned id and validated fields.
    #[must_use]
    pub fn new(id: UserId, user: NewUser) -> Self {
        let NewUser {
            username,
            age,
            gender,
        } = user;
        Self {
            id,
            username,
            age,
            gender,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Username as submitted.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }

    /// Gender label.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Apply the fields present in `patch`, leaving the rest untouched.
    #[must_use]
    pub fn apply(mut self, patch: &UserPatch) -> Self {
        if let Some(username) = &patch.username {
            self.username = username.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        self
    }
}

/// Partial update. Absent fields are left unchanged.
///
/// Only `username` and `age` are mutable; `id` and `gender` are fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement username, if any.
    pub username: Option<Username>,
    /// Replacement age, if any.
    pub age: Option<Age>,
}

impl UserPatch {
    /// Validate raw update inputs, skipping absent fields.
    pub fn try_from_parts(
        username: Option<String>,
        age: Option<i64>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: username.map(Username::new).transpose()?,
            age: age.map(Age::new).transpose()?,
        })
    }

    /// True when the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.age.is_none()
    }
}

/// Exact-match search filter over all three descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearchCriteria {
    /// Exact, case-sensitive username.
    pub username: Username,
    /// Exact age.
    pub age: SearchAge,
    /// Exact gender.
    pub gender: Gender,
}

impl UserSearchCriteria {
    /// Validate raw search inputs.
    pub fn try_from_parts(
        username: impl Into<String>,
        age: i64,
        gender: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            age: SearchAge::new(age)?,
            gender: gender.parse()?,
        })
    }

    /// Whether `user` equals the filter on every field.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        user.username() == &self.username
            && self.age.matches(user.age())
            && user.gender() == self.gender
    }
}

#[cfg(test)]
mod tests;
