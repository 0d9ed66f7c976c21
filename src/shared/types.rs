use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for every JSON response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

/// List metadata; `total` counts all matches, not just the returned page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    /// Successful list response; `total` may exceed `data.len()` for paged lists
    pub fn list(data: T, total: i64) -> Self {
        Self::success(Some(data), None, Some(Meta { total }))
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope() {
        let value = serde_json::to_value(ApiResponse::list(vec!["a", "b"], 12)).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
        assert_eq!(value["meta"]["total"], 12);
        assert!(value["errors"].is_null());
    }

    #[test]
    fn test_error_envelope() {
        let value = serde_json::to_value(ApiResponse::<()>::error(
            Some("City with id '9999' not found".to_string()),
            None,
        ))
        .unwrap();

        assert_eq!(value["success"], false);
        assert!(value["data"].is_null());
        assert_eq!(value["message"], "City with id '9999' not found");
    }
}
