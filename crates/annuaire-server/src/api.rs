use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use annuaire_core::Query as SearchQuery;
use annuaire_provider::DirectoryClient;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DirectoryClient>,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .fallback(resource_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /search?id=&name=&street=&town=` — the combined search: resolved
/// businesses with phones attached (`null` when the directory had none).
///
/// A failed search answers with the same body as an unknown route; the
/// distinction lives only in the server-side log.
async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match state.client.search(&query).await {
        Ok(businesses) => (StatusCode::OK, Json(businesses)).into_response(),
        Err(error) => {
            tracing::warn!(request_id = %req_id.0, error = %error, "search failed");
            resource_not_found().await.into_response()
        }
    }
}

async fn resource_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json("resource not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    /// Client whose sources are unroutable; every fetch fails fast.
    fn unreachable_state() -> AppState {
        let client = DirectoryClient::new(
            "http://127.0.0.1:1/recherche",
            "http://127.0.0.1:1",
            1,
            "annuaire-test/0.1",
        )
        .expect("client");
        AppState {
            client: Arc::new(client),
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = build_app(unreachable_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn unknown_route_answers_resource_not_found() {
        let app = build_app(unreachable_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, r#""resource not found""#);
    }

    #[tokio::test]
    async fn failed_search_answers_resource_not_found() {
        let app = build_app(unreachable_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/search?name=EXPERDECO")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, r#""resource not found""#);
    }

    #[tokio::test]
    async fn search_returns_businesses_with_phones_attached() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let registry = MockServer::start().await;
        let phone_directory = MockServer::start().await;

        let registry_page = r#"<div class="accordion-group">
              <div class="accordion-heading">
                <span>EXPERDECO</span><span>Etablissement siege</span><span>30383024400024</span>
              </div>
              <div class="result-left">
                <p>a</p><p>b</p><p>c</p>
                <p>Adresse : 70 RTE GIFFRE</p>
                <p>Commune : 74970 MARIGNIER</p>
              </div>
            </div>"#;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(registry_page))
            .mount(&registry)
            .await;

        let phone_page = r##"<ul class="bi_list"><li>
              <div class="bi_denomination"><h2>EXPERDECO</h2></div>
              <div class="bi_adress"><p>70 rte Giffre</p><p>74970 Marignier</p></div>
              <div class="bi_cta"><a href="#"><span>04 50 34 63 54</span></a></div>
            </li></ul>"##;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(phone_page))
            .mount(&phone_directory)
            .await;

        let client = DirectoryClient::new(
            &format!("{}/recherche", registry.uri()),
            &phone_directory.uri(),
            5,
            "annuaire-test/0.1",
        )
        .expect("client");
        let app = build_app(AppState {
            client: Arc::new(client),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/search?id=30383024400024")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json body");
        let results = json.as_array().expect("array body");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["name"].as_str(), Some("EXPERDECO"));
        assert_eq!(results[0]["phone"].as_str(), Some("+33 450346354"));
    }

    #[tokio::test]
    async fn request_id_header_is_passed_through() {
        let app = build_app(unreachable_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.to_str().unwrap()),
            Some("req-42")
        );
    }

    #[tokio::test]
    async fn request_id_header_is_generated_when_absent() {
        let app = build_app(unreachable_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert!(response.headers().contains_key("x-request-id"));
    }
}
