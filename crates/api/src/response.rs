//! Shared response envelope types for API handlers.
//!
//! All success responses use the `{ "success": true, "data": ... }`
//! envelope; mutation endpoints add a human-readable `message`. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!` blocks to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T: Serialize> DataResponse<T> {
    /// Envelope for read endpoints (no message).
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Envelope for mutation endpoints, with a confirmation message.
    pub fn with_message(data: T, message: &'static str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message),
        }
    }
}
