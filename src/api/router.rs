use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::leaders;
use super::parts;
use super::state::AppState;
use super::system;
use super::ws;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/leaders", get(leaders::list).post(leaders::register))
        .route("/leaders/{id}", delete(leaders::delete))
        .route("/leaders/{id}/complete", post(leaders::complete))
        .route("/leaders/{id}/help", post(leaders::toggle_help))
        .route(
            "/leaders/{leader_id}/todos/{todo_id}/toggle",
            post(leaders::toggle_todo),
        )
        .route("/parts", get(parts::list).post(parts::create))
        .route("/parts/active", get(parts::get_active))
        .route("/parts/{id}", put(parts::update).delete(parts::delete))
        .route("/parts/{id}/activate", post(parts::activate))
        .route(
            "/parts/{part_id}/todos/{todo_id}/toggle",
            post(parts::toggle_todo),
        )
        .route("/system/reset", post(system::reset))
        .route("/system/stats", get(system::stats));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/ws", get(ws::ws_handler))
        .nest("/api", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::broadcast::UpdatePublisher;
    use crate::domain::cache::TtlCache;
    use crate::domain::store::DocumentStore;
    use crate::infrastructure::broadcast::WsBroadcaster;
    use crate::infrastructure::cache::InMemoryTtlCache;
    use crate::infrastructure::services::{LeaderService, PartService, SystemService};
    use crate::infrastructure::store::InMemoryDocumentStore;

    fn test_router() -> Router {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
        let cache: Arc<dyn TtlCache> = Arc::new(InMemoryTtlCache::new());
        let broadcaster = Arc::new(WsBroadcaster::new());
        let publisher: Arc<dyn UpdatePublisher> = broadcaster.clone();

        let parts = Arc::new(PartService::new(
            store.clone(),
            cache.clone(),
            publisher.clone(),
        ));
        let leaders = Arc::new(LeaderService::new(
            store.clone(),
            cache.clone(),
            publisher.clone(),
            parts.clone(),
        ));
        let system = Arc::new(SystemService::new(
            store,
            cache,
            publisher,
            leaders.clone(),
            parts.clone(),
        ));

        create_router(AppState {
            leaders,
            parts,
            system,
            broadcaster,
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_and_list_leaders() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(post_json("/api/leaders", json!({"name": "Alice"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "Alice");
        assert_eq!(body["data"]["needsHelp"], false);

        let response = router
            .oneshot(Request::get("/api/leaders").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_leader_is_conflict() {
        let router = test_router();

        router
            .clone()
            .oneshot(post_json("/api/leaders", json!({"name": "Alice"})))
            .await
            .unwrap();

        let response = router
            .oneshot(post_json("/api/leaders", json!({"name": "alice"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("alice"));
    }

    #[tokio::test]
    async fn test_missing_leader_is_not_found() {
        let router = test_router();

        let response = router
            .oneshot(post_json("/api/leaders/nope/complete", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_renders_envelope() {
        let router = test_router();

        let request = Request::builder()
            .method("POST")
            .uri("/api/leaders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_part_lifecycle_over_http() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/parts",
                json!({"name": "P1", "todos": [{"title": "A"}]}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        let part_id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["active"], false);

        let response = router
            .clone()
            .oneshot(post_json(
                &format!("/api/parts/{}/activate", part_id),
                json!({}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["active"], true);

        let response = router
            .oneshot(
                Request::get("/api/parts/active")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["id"], part_id.as_str());
    }

    #[tokio::test]
    async fn test_stats_and_reset() {
        let router = test_router();

        router
            .clone()
            .oneshot(post_json("/api/leaders", json!({"name": "Alice"})))
            .await
            .unwrap();

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/system/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["totalLeaders"], 1);
        assert_eq!(body["data"]["completedLeaders"], 0);

        let response = router
            .oneshot(post_json("/api/system/reset", json!({})))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }
}
