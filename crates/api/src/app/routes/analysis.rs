use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use restock_reports::RunSnapshot;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn run(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let report = match services.analysis.run().await {
        Ok(r) => r,
        Err(e) => return errors::analysis_error_to_response(e),
    };

    {
        let mut history = services
            .run_history
            .write()
            .unwrap_or_else(|e| e.into_inner());
        history.push(RunSnapshot {
            captured_at: report.generated_at,
            global: report.global.clone(),
        });
    }

    (StatusCode::OK, Json(report)).into_response()
}
