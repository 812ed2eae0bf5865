//! OpenAPI document served through Swagger UI at `/docs`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::users::register,
        crate::api::handlers::users::login,
        crate::api::handlers::tasks::create_task,
        crate::api::handlers::tasks::list_tasks,
        crate::api::handlers::tasks::get_task,
        crate::api::handlers::tasks::update_task,
        crate::api::handlers::tasks::delete_task,
        crate::api::handlers::students::create_student,
        crate::api::handlers::students::list_students,
        crate::api::handlers::students::get_student,
        crate::api::handlers::students::update_student,
        crate::api::handlers::students::delete_student,
    ),
    components(schemas(
        crate::api::handlers::health::Health,
        crate::api::handlers::users::types::RegisterRequest,
        crate::api::handlers::users::types::LoginRequest,
        crate::api::handlers::users::types::UserResponse,
        crate::api::handlers::users::types::LoginResponse,
        crate::api::handlers::tasks::types::CreateTaskRequest,
        crate::api::handlers::tasks::types::UpdateTaskRequest,
        crate::api::handlers::tasks::types::TaskResponse,
        crate::api::handlers::students::types::CreateStudentRequest,
        crate::api::handlers::students::types::UpdateStudentRequest,
        crate::api::handlers::students::types::StudentResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "Registration and login"),
        (name = "tasks", description = "Per-user task list"),
        (name = "siswa", description = "Student records"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_routes() {
        let doc = ApiDoc::openapi();

        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.contains(&&"/health".to_string()));
        assert!(paths.contains(&&"/api/user/register".to_string()));
        assert!(paths.contains(&&"/api/user/login".to_string()));
        assert!(paths.contains(&&"/api/tasks".to_string()));
        assert!(paths.contains(&&"/api/tasks/{id}".to_string()));
        assert!(paths.contains(&&"/api/siswa".to_string()));
        assert!(paths.contains(&&"/api/siswa/{id}".to_string()));
    }

    #[test]
    fn test_no_schema_exposes_password_fields() {
        // Credential secrecy: response schemas never carry a password
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();

        for response_schema in ["UserResponse", "LoginResponse", "TaskResponse"] {
            assert!(json.contains(response_schema));
        }

        let components = doc.components.unwrap();
        for name in ["UserResponse", "LoginResponse"] {
            let schema = serde_json::to_value(components.schemas.get(name).unwrap()).unwrap();
            let properties = schema["properties"].as_object().unwrap();
            assert!(
                !properties.contains_key("password"),
                "{name} must not expose a password field"
            );
        }
    }
}
