use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use pitdeck_core::Deck;

use crate::state::AppState;

/// Replace the card document on disk with the posted body.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that a malformed body gets the reply the editor expects instead of the
/// framework's rejection.
pub async fn save_cards(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    let data: serde_json::Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "status": "error",
                    "message": "Invalid JSON data received",
                })),
            )
                .into_response();
        }
    };

    if !data.is_object() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "status": "error",
                "message": "Data must be a JSON object",
            })),
        )
            .into_response();
    }

    // Parsed tolerantly for the log line only; the document is stored as
    // posted, unrecognized fields included.
    let card_count = Deck::from_value(&data).len();

    let pretty = match serde_json::to_string_pretty(&data) {
        Ok(text) => text,
        Err(e) => return save_failed(e),
    };
    if let Err(e) = tokio::fs::write(&state.cards_path, pretty).await {
        tracing::error!(path = %state.cards_path.display(), error = %e, "failed to write card document");
        return save_failed(e);
    }

    tracing::info!(cards = card_count, path = %state.cards_path.display(), "card document saved");
    Json(serde_json::json!({
        "status": "success",
        "message": "Cards saved successfully",
    }))
    .into_response()
}

fn save_failed(e: impl std::fmt::Display) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "status": "error",
            "message": format!("An error occurred: {e}"),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(AppState {
            site_dir: dir.path().to_path_buf(),
            cards_path: dir.path().join("cards.json"),
        });
        let router = Router::new()
            .route("/save_cards", axum::routing::post(save_cards))
            .with_state(state);
        (router, dir)
    }

    async fn post_save(router: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/save_cards")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn rejects_unparseable_body() {
        let (router, _dir) = test_router();
        let (status, reply) = post_save(router, "not json{").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(reply["status"], "error");
        assert_eq!(reply["message"], "Invalid JSON data received");
    }

    #[tokio::test]
    async fn rejects_non_object_document() {
        let (router, _dir) = test_router();
        let (status, reply) = post_save(router, "[1, 2, 3]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(reply["message"], "Data must be a JSON object");
    }

    #[tokio::test]
    async fn writes_pretty_document_and_acknowledges() {
        let (router, dir) = test_router();
        let doc = r#"{"cards":{"Desert Comet":{"year":"1971","speed":3,"money":2}}}"#;
        let (status, reply) = post_save(router, doc).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["status"], "success");
        assert_eq!(reply["message"], "Cards saved successfully");

        let written = std::fs::read_to_string(dir.path().join("cards.json")).unwrap();
        assert!(written.contains('\n'), "document is pretty-printed");
        let round: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(round["cards"]["Desert Comet"]["speed"], 3);
    }

    #[tokio::test]
    async fn keeps_unrecognized_fields() {
        let (router, dir) = test_router();
        let doc = r#"{"cards":{"Rust Bucket":{"year":"1982","nickname":"Ol' Reliable"}},"revision":7}"#;
        let (status, _) = post_save(router, doc).await;
        assert_eq!(status, StatusCode::OK);

        let round: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("cards.json")).unwrap())
                .unwrap();
        assert_eq!(round["cards"]["Rust Bucket"]["nickname"], "Ol' Reliable");
        assert_eq!(round["revision"], 7);
    }

    #[tokio::test]
    async fn reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Point the cards path at a directory so the write fails.
        let state = Arc::new(AppState {
            site_dir: dir.path().to_path_buf(),
            cards_path: dir.path().to_path_buf(),
        });
        let router = Router::new()
            .route("/save_cards", axum::routing::post(save_cards))
            .with_state(state);

        let (status, reply) = post_save(router, "{}").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply["status"], "error");
        let message = reply["message"].as_str().unwrap();
        assert!(message.starts_with("An error occurred: "), "got: {message}");
    }
}
