use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that automatically adds the success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None, // Default to 200 OK
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
        }
    }

    /// Envelope body: `{ success: true, data }`.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let data_value = serde_json::to_value(&self.data)?;
        Ok(json!({
            "success": true,
            "data": data_value,
        }))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        match self.to_json() {
            Ok(envelope) => (status, Json(envelope)).into_response(),
            Err(e) => {
                tracing::error!("failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "failed to serialize response data",
                        "code": crate::error::UNKNOWN_CODE,
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Every handler resolves to exactly one envelope: a success wrapper or a
/// classified failure.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let body = ApiResponse::success(vec![1, 2, 3]).to_json().unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!([1, 2, 3]));
        assert!(body.get("error").is_none());
    }

    #[test]
    fn default_status_is_200() {
        let resp = ApiResponse::success(());
        assert_eq!(resp.status_code, None);
        let resp = ApiResponse::with_status((), StatusCode::CREATED);
        assert_eq!(resp.status_code, Some(StatusCode::CREATED));
    }
}
