//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed user entities and the use-case ports that
//! inbound and outbound adapters meet at. Types here know nothing about
//! HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request-scoped correlation identifier.
//! - User, NewUser, UserPatch, UserSearchCriteria and their field types.
//! - UsersService: implementation of the driving ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    AGE_MAX, AGE_MIN, Age, Gender, NewUser, SearchAge, USERNAME_MAX, USERNAME_MIN, User, UserId,
    UserPatch, UserSearchCriteria, UserValidationError, Username,
};
pub use self::users_service::UsersService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use users_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
