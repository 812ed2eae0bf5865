use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CreateTaskRequest {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("title is required".to_string());
        }

        errors
    }
}

/// Partial update; absent fields keep their stored value. `Option` makes
/// `completed: false` distinguishable from "not provided".
#[derive(ToSchema, Deserialize, Debug)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_validation() {
        let request = CreateTaskRequest {
            title: "write report".to_string(),
            description: String::new(),
        };
        assert!(request.validate().is_empty());

        let request = CreateTaskRequest {
            title: "  ".to_string(),
            description: String::new(),
        };
        assert_eq!(request.validate(), vec!["title is required"]);
    }

    #[test]
    fn test_update_distinguishes_absent_from_false() {
        let request: UpdateTaskRequest = serde_json::from_str(r#"{"completed": false}"#).unwrap();
        assert_eq!(request.completed, Some(false));
        assert!(request.title.is_none());

        let request: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(request.completed.is_none());
    }
}
