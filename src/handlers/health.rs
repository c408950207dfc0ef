use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::mailer::Mailer;
use crate::store::RecordStore;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "moodmirror-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
) -> (StatusCode, Json<Value>) {
    let store_ok = state.store.get("readyz:probe").await.is_ok();

    if store_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "store": "ok" },
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "store": "failed" },
            })),
        )
    }
}
