//! Per-user task CRUD. Every route here sits behind the bearer token gate
//! and is scoped to the authenticated account.

pub mod storage;
pub mod types;

use crate::api::handlers::auth::principal::Principal;
use crate::api::response::{error_response, success_response};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use storage::TaskRecord;
use tracing::{error, instrument};
use types::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};

fn task_response(record: TaskRecord) -> TaskResponse {
    TaskResponse {
        id: record.id,
        title: record.title,
        description: record.description,
        completed: record.completed,
        user_id: record.user_id,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_token" = [])),
    tag = "tasks"
)]
#[instrument(skip_all)]
pub async fn create_task(
    pool: Extension<PgPool>,
    principal: Extension<Principal>,
    payload: Option<Json<CreateTaskRequest>>,
) -> Response {
    let request: CreateTaskRequest = match payload {
        Some(Json(payload)) => payload,
        None => return validation_failed(json!(["invalid request body"])),
    };

    let errors = request.validate();
    if !errors.is_empty() {
        return validation_failed(json!(errors));
    }

    match storage::insert_task(
        &pool,
        principal.account_id,
        request.title.trim(),
        &request.description,
    )
    .await
    {
        Ok(record) => (
            StatusCode::CREATED,
            Json(success_response(
                Some(task_response(record)),
                "Task created successfully",
            )),
        )
            .into_response(),
        Err(err) => {
            error!("Error inserting task: {err}");

            internal_error("Failed to create task")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Tasks for the logged-in user", body = [TaskResponse]),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_token" = [])),
    tag = "tasks"
)]
#[instrument(skip_all)]
pub async fn list_tasks(pool: Extension<PgPool>, principal: Extension<Principal>) -> Response {
    match storage::list_tasks(&pool, principal.account_id).await {
        Ok(records) => {
            let tasks: Vec<TaskResponse> = records.into_iter().map(task_response).collect();

            (
                StatusCode::OK,
                Json(success_response(Some(tasks), "Tasks retrieved successfully")),
            )
                .into_response()
        }
        Err(err) => {
            error!("Error listing tasks: {err}");

            internal_error("Failed to retrieve tasks")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Task not found"),
    ),
    security(("bearer_token" = [])),
    tag = "tasks"
)]
#[instrument(skip_all)]
pub async fn get_task(
    pool: Extension<PgPool>,
    principal: Extension<Principal>,
    Path(id): Path<String>,
) -> Response {
    let Some(task_id) = parse_id(&id) else {
        return invalid_id();
    };

    match storage::find_task(&pool, principal.account_id, task_id).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(success_response(
                Some(task_response(record)),
                "Task retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found(),
        Err(err) => {
            error!("Error fetching task: {err}");

            internal_error("Failed to retrieve task")
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Task not found"),
    ),
    security(("bearer_token" = [])),
    tag = "tasks"
)]
#[instrument(skip_all)]
pub async fn update_task(
    pool: Extension<PgPool>,
    principal: Extension<Principal>,
    Path(id): Path<String>,
    payload: Option<Json<UpdateTaskRequest>>,
) -> Response {
    let Some(task_id) = parse_id(&id) else {
        return invalid_id();
    };

    let request: UpdateTaskRequest = match payload {
        Some(Json(payload)) => payload,
        None => return validation_failed(json!(["invalid request body"])),
    };

    // Read, merge, write back; absent fields keep their stored value.
    let existing = match storage::find_task(&pool, principal.account_id, task_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found(),
        Err(err) => {
            error!("Error fetching task: {err}");

            return internal_error("Failed to update task");
        }
    };

    let title = request.title.unwrap_or(existing.title);
    let description = request.description.unwrap_or(existing.description);
    let completed = request.completed.unwrap_or(existing.completed);

    if title.trim().is_empty() {
        return validation_failed(json!(["title is required"]));
    }

    match storage::update_task(
        &pool,
        principal.account_id,
        task_id,
        title.trim(),
        &description,
        completed,
    )
    .await
    {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(success_response(
                Some(task_response(record)),
                "Task updated successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found(),
        Err(err) => {
            error!("Error updating task: {err}");

            internal_error("Failed to update task")
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Task not found"),
    ),
    security(("bearer_token" = [])),
    tag = "tasks"
)]
#[instrument(skip_all)]
pub async fn delete_task(
    pool: Extension<PgPool>,
    principal: Extension<Principal>,
    Path(id): Path<String>,
) -> Response {
    let Some(task_id) = parse_id(&id) else {
        return invalid_id();
    };

    match storage::soft_delete_task(&pool, principal.account_id, task_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(success_response(
                None::<serde_json::Value>,
                "Task deleted successfully",
            )),
        )
            .into_response(),
        Ok(false) => not_found(),
        Err(err) => {
            error!("Error deleting task: {err}");

            internal_error("Failed to delete task")
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

fn invalid_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(error_response("Invalid task ID", None)),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(error_response("Task not found", None)),
    )
        .into_response()
}

fn validation_failed(errors: serde_json::Value) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(error_response("Validation failed", Some(errors))),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_response(message, None)),
    )
        .into_response()
}
