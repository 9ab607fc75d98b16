use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

pub async fn dashboard(
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<DashboardResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        DashboardResponseData {
            username: principal.username,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponseData {
    pub username: String,
}
