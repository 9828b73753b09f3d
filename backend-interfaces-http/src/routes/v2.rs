use axum::routing::{get, post, put};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{import_handlers, match_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v2/accounts/:account/imports/paste",
            post(import_handlers::import_paste),
        )
        .route(
            "/v2/accounts/:account/imports/csv",
            post(import_handlers::import_csv),
        )
        .route(
            "/v2/accounts/:account/imports/event",
            post(import_handlers::import_event),
        )
        .route(
            "/v2/accounts/:account/matches",
            get(match_handlers::list_matches),
        )
        .route(
            "/v2/accounts/:account/matches/:match_id/heroes",
            put(match_handlers::update_heroes),
        )
        .route(
            "/v2/accounts/:account/matches/:match_id/thread-key",
            get(match_handlers::match_thread_key),
        )
        .route(
            "/v2/accounts/:account/link",
            post(match_handlers::link_account),
        )
        .route("/v2/ops/health/live", get(ops_handlers::health_live))
        .route("/v2/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v2/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use backend_application::{AppState, Metrics};
    use backend_domain::RuntimeConfig;
    use backend_infrastructure::FileMatchStore;

    use super::build_router;

    const PASTE: &str = "Calling: Denver\nClassic Constructed\nRated\nFeb 14, 2026\n1 Jane Doe (12345) Win +12\n2 John Roe (67890) Loss -8\n";

    fn state_in(dir: &std::path::Path, api_token: Option<&str>) -> AppState {
        let store = Arc::new(FileMatchStore::new(dir));
        AppState {
            config: RuntimeConfig {
                api_token: api_token.map(ToString::to_string),
                data_dir: dir.to_string_lossy().to_string(),
                link_on_load: false,
                ..RuntimeConfig::default()
            },
            match_repo: store.clone(),
            account_directory: store,
            metrics: Arc::new(Metrics::default()),
        }
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn post_text(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn pasted_history_is_listed_back() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state_in(dir.path(), None));

        let (status, summary) = send(
            app.clone(),
            post_text("/v2/accounts/alice/imports/paste", PASTE),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["events"], 1);
        assert_eq!(summary["matches"], 2);

        let (status, matches) = send(app.clone(), get("/v2/accounts/alice/matches")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(matches.as_array().map(Vec::len), Some(2));
        assert_eq!(matches[0]["round_label"], "Round 1");

        let match_id = matches[0]["id"].as_str().unwrap().to_string();
        let (status, key) = send(
            app,
            get(&format!("/v2/accounts/alice/matches/{}/thread-key", match_id)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(key["thread_key"], "2026-02-14|calling: denver|round 1");
    }

    #[tokio::test]
    async fn empty_import_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state_in(dir.path(), None));

        let (status, body) = send(
            app,
            post_text("/v2/accounts/alice/imports/paste", "Welcome back!\n"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad request: no matches found");
    }

    #[tokio::test]
    async fn invalid_account_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state_in(dir.path(), None));

        let (status, _) = send(app, get("/v2/accounts/al.ice/matches")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn token_guards_account_routes_but_not_liveness() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state_in(dir.path(), Some("secret")));

        let (status, _) = send(app.clone(), get("/v2/accounts/alice/matches")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let authorized = Request::builder()
            .uri("/v2/accounts/alice/matches")
            .header("Authorization", "Bearer secret")
            .body(Body::empty())
            .unwrap();
        let (status, matches) = send(app.clone(), authorized).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(matches, Value::Array(Vec::new()));

        let (status, _) = send(app, get("/v2/ops/health/live")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn hero_edit_of_missing_match_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state_in(dir.path(), None));

        let request = Request::builder()
            .method("PUT")
            .uri("/v2/accounts/alice/matches/missing/heroes")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"hero_played":"Katsu"}"#))
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn readiness_follows_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(state_in(&dir.path().join("absent"), None));
        let (status, _) = send(app, get("/v2/ops/health/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let app = build_router(state_in(dir.path(), None));
        let (status, _) = send(app, get("/v2/ops/health/ready")).await;
        assert_eq!(status, StatusCode::OK);
    }
}
