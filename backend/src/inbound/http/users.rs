//! Users API handlers.
//!
//! ```text
//! POST   /users               {"username":"ada","age":36,"gender":"female"}
//! GET    /users
//! GET    /users/search?username=ada&age=36&gender=female
//! GET    /users/{id}
//! PUT    /users/{id}          {"age":37}
//! DELETE /users/{id}
//! ```
//!
//! Handlers accept loosely typed request bodies so that every field failure
//! is reported through the domain validators with a named field, rather than
//! as an opaque deserialisation error.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{NewUser, User, UserId, UserPatch, UserSearchCriteria, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    json_config, map_user_validation_error, path_config, query_config,
};

/// Integer body fields that also accept integral floats such as `36.0`.
///
/// Fractional, non-finite and out-of-range numbers are still rejected.
mod whole_number {
    use std::fmt;

    use serde::Deserialize;
    use serde::de::{self, Deserializer, Unexpected, Visitor};

    /// `2^63`, the first float past `i64::MAX`.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    const LOWER: f64 = -9_223_372_036_854_775_808.0;

    struct WholeNumber;

    impl Visitor<'_> for WholeNumber {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a whole number")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            if value.fract() != 0.0 || !(LOWER..UPPER).contains(&value) {
                return Err(E::invalid_value(Unexpected::Float(value), &self));
            }
            // Integral and in range, so the cast is exact.
            Ok(value as i64)
        }
    }

    #[derive(Deserialize)]
    struct Present(#[serde(deserialize_with = "deserialize")] i64);

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(WholeNumber)
    }

    pub(super) fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        Ok(Option::<Present>::deserialize(deserializer)?.map(|Present(value)| value))
    }
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(min_length = 1, max_length = 50, example = "ada")]
    pub username: String,
    #[serde(deserialize_with = "whole_number::deserialize")]
    #[schema(minimum = 0, maximum = 120, example = 36)]
    pub age: i64,
    #[schema(example = "female")]
    pub gender: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.username, value.age, &value.gender)
    }
}

/// Request body for `PUT /users/{id}`.
///
/// Absent or `null` fields leave the stored value unchanged. Other keys,
/// including `gender`, are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[schema(min_length = 1, max_length = 50, example = "ada")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    #[schema(minimum = 0, maximum = 120, example = 37)]
    pub age: Option<i64>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = UserValidationError;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.username, value.age)
    }
}

/// Query string for `GET /users/search`. All parameters are required.
#[derive(Debug, Clone, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchUsersParams {
    /// Exact username, 1 to 50 characters.
    pub username: String,
    /// Exact age, strictly greater than 0.
    pub age: i64,
    /// `male` or `female`.
    pub gender: String,
}

impl TryFrom<SearchUsersParams> for UserSearchCriteria {
    type Error = UserValidationError;

    fn try_from(value: SearchUsersParams) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.username, value.age, &value.gender)
    }
}

/// Response body for `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CreatedUserResponse {
    #[schema(example = 1)]
    pub id: i64,
}

/// Response body for `DELETE /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeletedUserResponse {
    #[schema(example = "User: 1, Successfully Deleted.")]
    pub detail: String,
}

impl DeletedUserResponse {
    fn for_user(id: UserId) -> Self {
        Self {
            detail: format!("User: {id}, Successfully Deleted."),
        }
    }
}

fn parse_user_id(raw: i64) -> ApiResult<UserId> {
    UserId::new(raw).map_err(map_user_validation_error)
}

/// Register the user routes and their extractor configuration.
///
/// `/users/search` is registered ahead of `/users/{id}` so the literal
/// segment is never parsed as an identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::inbound::http::users::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(search_users)
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

/// Create a user and return its assigned id.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreatedUserResponse),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<CreatedUserResponse>> {
    let user = NewUser::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let id = state.users.create_user(user).await?;
    Ok(web::Json(CreatedUserResponse { id: id.value() }))
}

/// List every user ordered by id.
///
/// An empty store is reported as 404.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 404, description = "No users stored", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Find users equal to all three filters.
#[utoipa::path(
    get,
    path = "/users/search",
    params(SearchUsersParams),
    responses(
        (status = 200, description = "Matching users", body = [UserSchema]),
        (status = 404, description = "No matching users", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    params: web::Query<SearchUsersParams>,
) -> ApiResult<web::Json<Vec<User>>> {
    let criteria =
        UserSearchCriteria::try_from(params.into_inner()).map_err(map_user_validation_error)?;
    let users = state.users_query.search_users(criteria).await?;
    Ok(web::Json(users))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, minimum = 1, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Invalid id", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(user))
}

/// Update `username` and/or `age`, returning the updated record.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, minimum = 1, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(path.into_inner())?;
    let patch = UserPatch::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let user = state.users.update_user(id, patch).await?;
    Ok(web::Json(user))
}

/// Delete a user permanently.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, minimum = 1, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Invalid id", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    state.users.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(DeletedUserResponse::for_user(id)))
}
