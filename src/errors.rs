use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Why a webhook source could not be served.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error")]
    Http { code: u16 },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("{0}")]
    InvalidStructure(String),

    #[error("Orders array is empty")]
    NoOrders,

    #[error("Invalid order structure")]
    InvalidOrderStructure,
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network_error",
            Self::Http { .. } => "http_error",
            Self::Json(_) => "json_error",
            Self::InvalidStructure(_) => "invalid_structure",
            Self::NoOrders => "no_orders",
            Self::InvalidOrderStructure => "invalid_order_structure",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
    pub code: Option<u16>,
}

impl AppError {
    pub fn bad_request(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            kind: "invalid_nonce",
            message: message.into(),
            code: None,
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal_error",
            message: err.to_string(),
            code: None,
        }
    }
}

/// Upstream failures still answer 200 so the dashboard can read the envelope.
impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let code = match &err {
            FetchError::Http { code } => Some(*code),
            _ => None,
        };
        Self {
            status: StatusCode::OK,
            kind: err.kind(),
            message: err.to_string(),
            code,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let mut data = json!({
            "message": self.message,
            "type": self.kind,
        });
        if let Some(code) = self.code {
            data["code"] = json!(code);
        }
        (self.status, Json(json!({ "success": false, "data": data }))).into_response()
    }
}
