use serde::Serialize;
pub(crate) mod assignment_controller;
pub(crate) mod auth_controller;
pub(crate) mod class_controller;
pub(crate) mod feedback_category_controller;
pub(crate) mod feedback_controller;
pub(crate) mod health_check_controller;
pub(crate) mod submission_controller;
pub(crate) mod user;

/// Envelope every successful handler returns: the HTTP status repeated in
/// the body plus an optional payload. `data` is omitted, not null, when the
/// operation has nothing to return (deletes, password updates).
#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status_code: u16, data: T) -> Self {
        Self {
            status_code,
            data: Some(data),
        }
    }

    pub fn no_content(status_code: u16) -> ApiResponse<()> {
        ApiResponse {
            status_code,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn payload_serializes_under_the_data_key() {
        let response = ApiResponse::new(StatusCode::OK.into(), 23);
        let serialized = serde_json::to_string(&response).unwrap();

        // Compare as Values since serde_json key order is not guaranteed
        let actual: serde_json::Value = serde_json::from_str(&serialized).unwrap();
        assert_eq!(actual, json!({"data": 23, "status_code": 200}));
    }

    #[test]
    fn no_content_omits_the_data_key() {
        let response = ApiResponse::<()>::no_content(StatusCode::NO_CONTENT.into());
        let serialized = serde_json::to_string(&response).unwrap();
        assert_eq!(serialized, json!({"status_code": 204}).to_string());
    }
}
