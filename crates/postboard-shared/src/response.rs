//! Response envelopes: `ApiResponse` for success, RFC 7807 problem details
//! for failures.

use serde::{Deserialize, Serialize};

/// Envelope around every successful payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

/// Problem details body (RFC 7807).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// 400 - the request could not be parsed.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    /// 404 - the referenced post does not exist.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    /// 422 - the request parsed but its fields are invalid.
    pub fn unprocessable_entity(detail: impl Into<String>) -> Self {
        Self::new(422, "Validation Failed").with_detail(detail)
    }

    /// 500 - deliberately carries no detail.
    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_omits_empty_detail() {
        let json = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 500);
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn not_found_carries_detail() {
        let json = serde_json::to_value(ErrorResponse::not_found("Post with id 3 not found"))
            .unwrap();
        assert_eq!(json["title"], "Not Found");
        assert_eq!(json["detail"], "Post with id 3 not found");
    }

    #[test]
    fn message_is_only_serialized_when_set() {
        let json = serde_json::to_value(ApiResponse::ok(5)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 5);
        assert!(json.get("message").is_none());

        let json = serde_json::to_value(ApiResponse::ok_with_message(5, "done")).unwrap();
        assert_eq!(json["message"], "done");
    }
}
