//! Shared fixtures for the HTTP route tests.

use std::sync::Arc;

use airgap_axum::bootstrap::{AxumContext, CorsConfig};
use airgap_axum::routes::create_router;
use airgap_core::ports::{FixedClock, ServiceDeps};
use airgap_core::test_utils::{RecordingAuditSink, ScriptedEngine};
use airgap_core::{SecureLlmService, ServiceConfig};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub struct TestApp {
    pub service: Arc<SecureLlmService>,
    pub engine: Arc<ScriptedEngine>,
    // Allow unused: only some test files assert on audit events
    #[allow(dead_code)]
    pub audit: Arc<RecordingAuditSink>,
}

impl TestApp {
    pub fn new(config: ServiceConfig) -> Self {
        let engine = Arc::new(ScriptedEngine::new());
        let audit = Arc::new(RecordingAuditSink::new());
        let deps = ServiceDeps::new(engine.clone())
            .with_clock(Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap(),
            )))
            .with_audit(audit.clone());
        let service = Arc::new(SecureLlmService::new(config, deps).unwrap());
        Self {
            service,
            engine,
            audit,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ServiceConfig::with_defaults())
    }

    pub fn router(&self) -> Router {
        create_router(
            AxumContext::new(Arc::clone(&self.service)),
            &CorsConfig::AllowAll,
        )
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    // Allow unused: not every test file posts without a body
    #[allow(dead_code)]
    pub async fn post_empty(&self, uri: &str) -> Response<Body> {
        self.router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Collect a response into its status and JSON body.
pub async fn json_body(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}
