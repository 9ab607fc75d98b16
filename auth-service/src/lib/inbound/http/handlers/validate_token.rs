use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Always answers 200; the verdict is in the body.
pub async fn validate_token(
    State(state): State<AppState>,
    Json(body): Json<ValidateTokenRequestBody>,
) -> ApiSuccess<ValidateTokenResponseData> {
    let valid = state
        .login_service
        .validate_token(&body.username, &body.token);

    ApiSuccess::new(StatusCode::OK, ValidateTokenResponseData { valid })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateTokenRequestBody {
    username: String,
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub valid: bool,
}
