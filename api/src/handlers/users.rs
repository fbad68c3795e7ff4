use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use roster_common::{
    caller::Caller,
    params::{CreateUserParams, UpdateUserParams},
    views::{ApiErrorResponse, User},
};
use roster_db::storage::{UserFilter, UserStore};
use tracing::{debug, info};

use crate::{
    auth::Auth, context::ApiContext, error::ApiError, json::ValidatedJson, path::UserId,
};

fn caller_id(caller: &Caller) -> String {
    caller
        .api_caller()
        .and_then(|c| c.id().map_err(Into::into))
        .unwrap_or_else(|_| "anonymous".into())
}

#[utoipa::path(
    get,
    path = "/users",
    tags = ["users"],
    security(("bearer" = [])),
    responses((status = 200, description = "All users, oldest first", body = Vec<User>))
)]
pub async fn list_users(
    State(ctx): State<ApiContext>,
    Auth(_caller): Auth,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserStore::list(&*ctx.db, UserFilter::default()).await?;
    debug!(count = users.len(), "Listed users");

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tags = ["users"],
    security(("bearer" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Resolved user", body = User),
        (status = 404, description = "User not found", body = ApiErrorResponse),
    )
)]
pub async fn get_user(
    State(ctx): State<ApiContext>,
    Auth(_caller): Auth,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    let user = UserStore::get(&*ctx.db, &id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/users",
    tags = ["users"],
    security(("bearer" = [])),
    request_body(content = CreateUserParams, content_type = "application/json"),
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failed", body = ApiErrorResponse),
    )
)]
pub async fn create_user(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
    ValidatedJson(params): ValidatedJson<CreateUserParams>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    params.validate()?;

    let created = UserStore::create(&*ctx.db, params).await?;
    info!(user = %created, created_by = %caller_id(&caller), "Created user");

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tags = ["users"],
    security(("bearer" = [])),
    params(("id" = String, Path, description = "User id")),
    request_body(content = UpdateUserParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Validation failed", body = ApiErrorResponse),
        (status = 404, description = "User not found", body = ApiErrorResponse),
    )
)]
pub async fn update_user(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
    UserId(id): UserId,
    ValidatedJson(params): ValidatedJson<UpdateUserParams>,
) -> Result<Json<User>, ApiError> {
    params.validate()?;

    let updated = UserStore::update(&*ctx.db, &id, params)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    info!(user = %updated, updated_by = %caller_id(&caller), "Updated user");

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tags = ["users"],
    security(("bearer" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user as it was before deletion", body = User),
        (status = 404, description = "User not found", body = ApiErrorResponse),
    )
)]
pub async fn delete_user(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    let deleted = UserStore::delete(&*ctx.db, &id)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    info!(user = %deleted, deleted_by = %caller_id(&caller), "Deleted user");

    Ok(Json(deleted.into()))
}
