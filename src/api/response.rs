//! Shared response envelope used by every `/api` endpoint.

use serde::Serialize;

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ResponseWrapper<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

/// Create a success response, optionally carrying a data payload.
pub fn success_response<T: Serialize>(data: Option<T>, message: &str) -> ResponseWrapper<T> {
    ResponseWrapper {
        success: true,
        message: message.to_string(),
        data,
        error: None,
    }
}

/// Create an error response.
pub fn error_response(
    message: &str,
    error: Option<serde_json::Value>,
) -> ResponseWrapper<serde_json::Value> {
    ResponseWrapper {
        success: false,
        message: message.to_string(),
        data: None,
        error,
    }
}

/// Paginated list payload.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    #[must_use]
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_response_shape() {
        let response = success_response(Some(json!({"id": 1})), "ok");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "ok", "data": {"id": 1}})
        );
    }

    #[test]
    fn test_success_response_without_data_omits_field() {
        let response = success_response(None::<serde_json::Value>, "deleted");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"success": true, "message": "deleted"}));
    }

    #[test]
    fn test_error_response_shape() {
        let response = error_response("Validation failed", Some(json!(["name is required"])));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "Validation failed",
                "error": ["name is required"]
            })
        );
    }

    #[test]
    fn test_pagination_math() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 25, 1, 10);
        assert_eq!(page.total_pages, 3);

        let page = PaginatedResponse::new(Vec::<i32>::new(), 30, 2, 10);
        assert_eq!(page.total_pages, 3);

        let page = PaginatedResponse::new(Vec::<i32>::new(), 0, 1, 10);
        assert_eq!(page.total_pages, 0);
    }
}
