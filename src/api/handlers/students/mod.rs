//! Student records CRUD with pagination and substring search.

pub mod storage;
pub mod types;

use crate::api::response::{error_response, success_response, PaginatedResponse};
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use storage::StudentRecord;
use tracing::{error, instrument};
use types::{
    parse_birth_date, CreateStudentRequest, ListStudentsQuery, StudentResponse,
    UpdateStudentRequest,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

fn student_response(record: StudentRecord) -> StudentResponse {
    StudentResponse {
        id: record.id,
        nis: record.nis,
        name: record.name,
        gender: record.gender,
        birth_place: record.birth_place,
        birth_date: record.birth_date,
        address: record.address,
        phone: record.phone,
        email: record.email.unwrap_or_default(),
        class: record.class,
        enrollment_year: record.enrollment_year,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

#[utoipa::path(
    post,
    path = "/api/siswa",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "NIS or email already registered"),
    ),
    tag = "siswa"
)]
#[instrument(skip_all)]
pub async fn create_student(
    pool: Extension<PgPool>,
    payload: Option<Json<CreateStudentRequest>>,
) -> Response {
    let request: CreateStudentRequest = match payload {
        Some(Json(payload)) => payload,
        None => return validation_failed(json!(["invalid request body"])),
    };

    let errors = request.validate();
    if !errors.is_empty() {
        return validation_failed(json!(errors));
    }

    let birth_date = match parse_birth_date(&request.birth_date) {
        Ok(birth_date) => birth_date,
        Err(message) => return validation_failed(json!([message])),
    };

    match storage::nis_exists(&pool, request.nis.trim(), None).await {
        Ok(true) => return conflict("nis already registered"),
        Ok(false) => (),
        Err(err) => {
            error!("Error checking NIS: {err}");

            return internal_error("Failed to create student");
        }
    }

    let email = normalize_optional(Some(request.email.clone()));
    if let Some(email) = &email {
        match storage::email_exists(&pool, email, None).await {
            Ok(true) => return conflict("email already registered"),
            Ok(false) => (),
            Err(err) => {
                error!("Error checking email: {err}");

                return internal_error("Failed to create student");
            }
        }
    }

    match storage::insert_student(
        &pool,
        request.nis.trim(),
        request.name.trim(),
        &request.gender,
        &request.birth_place,
        birth_date,
        &request.address,
        &request.phone,
        email.as_deref(),
        &request.class,
        request.enrollment_year,
    )
    .await
    {
        Ok(record) => (
            StatusCode::CREATED,
            Json(success_response(
                Some(student_response(record)),
                "Student created successfully",
            )),
        )
            .into_response(),
        Err(err) => {
            error!("Error inserting student: {err}");

            internal_error("Failed to create student")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/siswa",
    params(ListStudentsQuery),
    responses(
        (status = 200, description = "Paginated students", body = [StudentResponse]),
        (status = 500, description = "Failed to retrieve students"),
    ),
    tag = "siswa"
)]
#[instrument(skip_all)]
pub async fn list_students(
    pool: Extension<PgPool>,
    Query(query): Query<ListStudentsQuery>,
) -> Response {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let search = query.search.unwrap_or_default();
    let offset = (page - 1) * limit;

    let total = match storage::count_students(&pool, &search).await {
        Ok(total) => total,
        Err(err) => {
            error!("Error counting students: {err}");

            return internal_error("Failed to retrieve students");
        }
    };

    match storage::list_students(&pool, &search, limit, offset).await {
        Ok(records) => {
            let students: Vec<StudentResponse> =
                records.into_iter().map(student_response).collect();
            let result = PaginatedResponse::new(students, total, page, limit);

            (
                StatusCode::OK,
                Json(success_response(
                    Some(result),
                    "Students retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(err) => {
            error!("Error listing students: {err}");

            internal_error("Failed to retrieve students")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/siswa/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found"),
    ),
    tag = "siswa"
)]
#[instrument(skip_all)]
pub async fn get_student(pool: Extension<PgPool>, Path(id): Path<String>) -> Response {
    let Some(student_id) = parse_id(&id) else {
        return invalid_id();
    };

    match storage::find_student(&pool, student_id).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(success_response(
                Some(student_response(record)),
                "Student retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found(),
        Err(err) => {
            error!("Error fetching student: {err}");

            internal_error("Failed to retrieve student")
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/siswa/{id}",
    params(("id" = i64, Path, description = "Student id")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "NIS or email already registered"),
    ),
    tag = "siswa"
)]
#[instrument(skip_all)]
pub async fn update_student(
    pool: Extension<PgPool>,
    Path(id): Path<String>,
    payload: Option<Json<UpdateStudentRequest>>,
) -> Response {
    let Some(student_id) = parse_id(&id) else {
        return invalid_id();
    };

    let request: UpdateStudentRequest = match payload {
        Some(Json(payload)) => payload,
        None => return validation_failed(json!(["invalid request body"])),
    };

    let errors = request.validate();
    if !errors.is_empty() {
        return validation_failed(json!(errors));
    }

    let mut student = match storage::find_student(&pool, student_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found(),
        Err(err) => {
            error!("Error fetching student: {err}");

            return internal_error("Failed to update student");
        }
    };

    // Duplicate checks only when the unique fields actually change
    if let Some(nis) = normalize_optional(request.nis) {
        if nis != student.nis {
            match storage::nis_exists(&pool, &nis, Some(student_id)).await {
                Ok(true) => return conflict("nis already registered"),
                Ok(false) => student.nis = nis,
                Err(err) => {
                    error!("Error checking NIS: {err}");

                    return internal_error("Failed to update student");
                }
            }
        }
    }

    if let Some(email) = normalize_optional(request.email) {
        if student.email.as_deref() != Some(email.as_str()) {
            match storage::email_exists(&pool, &email, Some(student_id)).await {
                Ok(true) => return conflict("email already registered"),
                Ok(false) => student.email = Some(email),
                Err(err) => {
                    error!("Error checking email: {err}");

                    return internal_error("Failed to update student");
                }
            }
        }
    }

    if let Some(name) = normalize_optional(request.name) {
        student.name = name;
    }
    if let Some(gender) = request.gender {
        student.gender = gender;
    }
    if let Some(birth_place) = request.birth_place {
        student.birth_place = birth_place;
    }
    if let Some(raw) = request.birth_date {
        match parse_birth_date(&raw) {
            Ok(Some(birth_date)) => student.birth_date = Some(birth_date),
            Ok(None) => (),
            Err(message) => return validation_failed(json!([message])),
        }
    }
    if let Some(address) = request.address {
        student.address = address;
    }
    if let Some(phone) = request.phone {
        student.phone = phone;
    }
    if let Some(class) = request.class {
        student.class = class;
    }
    if let Some(enrollment_year) = request.enrollment_year {
        student.enrollment_year = enrollment_year;
    }

    match storage::update_student(&pool, &student).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(success_response(
                Some(student_response(record)),
                "Student updated successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found(),
        Err(err) => {
            error!("Error updating student: {err}");

            internal_error("Failed to update student")
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/siswa/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found"),
    ),
    tag = "siswa"
)]
#[instrument(skip_all)]
pub async fn delete_student(pool: Extension<PgPool>, Path(id): Path<String>) -> Response {
    let Some(student_id) = parse_id(&id) else {
        return invalid_id();
    };

    match storage::soft_delete_student(&pool, student_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(success_response(
                None::<serde_json::Value>,
                "Student deleted successfully",
            )),
        )
            .into_response(),
        Ok(false) => not_found(),
        Err(err) => {
            error!("Error deleting student: {err}");

            internal_error("Failed to delete student")
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

fn invalid_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(error_response("Invalid student ID", None)),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(error_response("Student not found", None)),
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

fn conflict(message: &str) -> Response {
    (
        StatusCode::CONFLICT,
        Json(error_response("Failed to save student", Some(json!(message)))),
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
