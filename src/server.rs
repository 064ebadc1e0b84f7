//! Axum router and server setup.
//! Used by: main.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers::{admin, auth, health, metrics, public};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/contests", get(public::contests))
        .route("/api/testimonials", get(public::testimonials))
        .route("/api/contact", post(public::contact))
        .route("/api/breach-proposals", post(public::propose_breach))
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/verify", get(auth::verify))
        .route("/api/admin/metrics", get(metrics::metrics))
        .route(
            "/api/admin/collections/:collection",
            get(admin::list).post(admin::create),
        )
        .route(
            "/api/admin/collections/:collection/:id",
            get(admin::get).patch(admin::update).delete(admin::delete),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::build_test_state;
    use crate::token::claims::Claims;

    const ADMIN_ID: &str = "root-admin";
    const SECRET_KEY: &str = "hunter2";

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn app() -> std::result::Result<(Router, AppState), Box<dyn std::error::Error>> {
        let state = build_test_state("router-secret", ADMIN_ID, SECRET_KEY)?;
        Ok((build_router(state.clone()), state))
    }

    async fn send(router: &Router, request: Request<Body>) -> std::result::Result<(StatusCode, Value), Box<dyn std::error::Error>> {
        let response: Response = router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, body))
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap_or_default()
    }

    fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap_or_default()
    }

    async fn login(router: &Router) -> std::result::Result<String, Box<dyn std::error::Error>> {
        let (status, body) = send(
            router,
            json_request("POST", "/api/admin/login", None, json!({"adminId": ADMIN_ID, "secretKey": SECRET_KEY})),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["expiresIn"], json!(3600));
        Ok(body["token"].as_str().unwrap_or_default().to_owned())
    }

    #[tokio::test]
    async fn health_is_public() -> TestResult {
        let (router, _) = app()?;
        let (status, body) = send(&router, get_request("/health", None)).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
        Ok(())
    }

    #[tokio::test]
    async fn login_issues_verifiable_admin_token() -> TestResult {
        let (router, state) = app()?;
        let token = login(&router).await?;
        let claims = state.tokens.verify(&token)?;
        assert_eq!(claims.sub, ADMIN_ID);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(state.metrics.snapshot().tokens_issued, 1);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_credentials_rejected() -> TestResult {
        let (router, state) = app()?;
        let (status, body) = send(
            &router,
            json_request("POST", "/api/admin/login", None, json!({"adminId": ADMIN_ID, "secretKey": "nope"})),
        )
        .await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("token").is_none());
        assert_eq!(state.metrics.snapshot().logins_failed, 1);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_login_attempts_are_throttled() -> TestResult {
        let (router, _) = app()?;
        let attempt = || json_request("POST", "/api/admin/login", None, json!({"adminId": ADMIN_ID, "secretKey": "guess"}));
        for _ in 0..5 {
            let (status, _) = send(&router, attempt()).await?;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
        let (status, _) = send(&router, attempt()).await?;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        Ok(())
    }

    #[tokio::test]
    async fn verify_endpoint_returns_claims() -> TestResult {
        let (router, _) = app()?;
        let token = login(&router).await?;
        let (status, body) = send(&router, get_request("/api/admin/verify", Some(&format!("Bearer {}", token)))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(true));
        assert_eq!(body["claims"]["sub"], json!(ADMIN_ID));
        assert_eq!(body["claims"]["role"], json!("admin"));
        Ok(())
    }

    #[tokio::test]
    async fn every_rejection_looks_the_same_on_the_wire() -> TestResult {
        let (router, state) = app()?;
        let mut expired = Claims::admin(ADMIN_ID, chrono::Utc::now().timestamp() - 7200);
        expired.exp = expired.iat + 10;
        let expired = state.tokens.issue(&expired)?;

        let cases = [
            None,
            Some("Token abc".to_owned()),
            Some("Bearer not-a-token".to_owned()),
            Some(format!("Bearer {}", expired)),
        ];
        for authorization in cases {
            let (status, body) = send(&router, get_request("/api/admin/verify", authorization.as_deref())).await?;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({"error": "unauthorized"}));
        }

        let rejections = state.metrics.snapshot().rejections;
        assert_eq!(rejections.missing, 2);
        assert_eq!(rejections.malformed, 1);
        assert_eq!(rejections.expired, 1);
        Ok(())
    }

    #[tokio::test]
    async fn admin_routes_require_token_before_touching_store() -> TestResult {
        let (router, state) = app()?;
        let (status, _) = send(
            &router,
            json_request("POST", "/api/admin/collections/contests", None, json!({"title": "x", "description": "y"})),
        )
        .await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(state.store.list(crate::store::Collection::Contests, 10)?.is_empty());

        let (status, _) = send(&router, get_request("/api/admin/metrics", None)).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn admin_manages_contests() -> TestResult {
        let (router, _) = app()?;
        let token = login(&router).await?;

        let (status, created) = send(
            &router,
            json_request(
                "POST",
                "/api/admin/collections/contests",
                Some(&token),
                json!({"title": "Spring Sprint", "description": "Find auth bypasses", "reward": 1000}),
            ),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap_or_default().to_owned();

        let (status, listed) = send(&router, get_request("/api/contests", None)).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["title"], json!("Spring Sprint"));

        let uri = format!("/api/admin/collections/contests/{}", id);
        let (status, updated) = send(&router, json_request("PATCH", &uri, Some(&token), json!({"reward": 2000}))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["reward"], json!(2000));
        assert_eq!(updated["title"], json!("Spring Sprint"));

        let delete = Request::builder()
            .method("DELETE")
            .uri(&uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())?;
        let (status, _) = send(&router, delete).await?;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, get_request(&uri, Some(&format!("Bearer {}", token)))).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_record_rejected() -> TestResult {
        let (router, _) = app()?;
        let token = login(&router).await?;
        let (status, _) = send(
            &router,
            json_request("POST", "/api/admin/collections/testimonials", Some(&token), json!({"author": "Ada"})),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn breach_proposal_review_flow() -> TestResult {
        let (router, _) = app()?;
        let (status, proposal) = send(
            &router,
            json_request(
                "POST",
                "/api/breach-proposals",
                None,
                json!({"title": "IDOR on invoices", "details": "GET /invoices/2", "submitter": "eve", "status": "approved"}),
            ),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(proposal["status"], json!("pending"));

        let token = login(&router).await?;
        let uri = format!("/api/admin/collections/breach-proposals/{}", proposal["id"].as_str().unwrap_or_default());

        let (status, _) = send(&router, json_request("PATCH", &uri, Some(&token), json!({"status": "paid"}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, reviewed) = send(&router, json_request("PATCH", &uri, Some(&token), json!({"status": "approved"}))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reviewed["status"], json!("approved"));
        Ok(())
    }

    #[tokio::test]
    async fn contact_messages_visible_only_to_admin() -> TestResult {
        let (router, _) = app()?;
        let (status, _) = send(
            &router,
            json_request("POST", "/api/contact", None, json!({"name": "Ada", "email": "ada@example.com", "message": "hello"})),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&router, get_request("/api/admin/collections/contact-messages", None)).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = login(&router).await?;
        let (status, messages) = send(
            &router,
            get_request("/api/admin/collections/contact-messages", Some(&format!("Bearer {}", token))),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(messages.as_array().map(Vec::len), Some(1));
        assert_eq!(messages[0]["email"], json!("ada@example.com"));
        Ok(())
    }

    #[tokio::test]
    async fn metrics_visible_to_admin() -> TestResult {
        let (router, _) = app()?;
        let token = login(&router).await?;
        let (status, body) = send(&router, get_request("/api/admin/metrics", Some(&format!("Bearer {}", token)))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["logins_succeeded"], json!(1));
        assert_eq!(body["tokens_verified"], json!(1));
        Ok(())
    }
}
