use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the active report profile.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "report_profile": state.pipeline.profile(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::recommendation::pipeline::testing::ScriptedClient;
    use crate::routes::build_router;
    use crate::state::testing::state_with;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_health_reports_profile() {
        let app = build_router(state_with(
            Arc::new(MemoryStore::new()),
            ScriptedClient::replying("1. x"),
        ));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "careerpath-api");
        assert_eq!(body["report_profile"], "extended");
    }
}
