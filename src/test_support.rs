//! Helpers for driving the router in-process with `oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{auth::jwt::JwtKeys, state::AppState};

pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(header::HeaderName, String)>,
    body: Option<String>,
}

impl TestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push((header::AUTHORIZATION, format!("Bearer {token}")));
        self
    }

    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("serialize request body"));
        self.headers
            .push((header::CONTENT_TYPE, "application/json".to_owned()));
        self
    }
}

/// Runs the request and returns the status with the body parsed as JSON
/// (`Null` when the body is not JSON).
pub async fn send(app: &Router, req: TestRequest) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(req.method).uri(req.uri);
    for (key, value) in req.headers {
        builder = builder.header(key, value);
    }
    let request = builder
        .body(Body::from(req.body.unwrap_or_default()))
        .expect("build request");

    let response = app.clone().oneshot(request).await.expect("execute request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn access_token(state: &AppState, user_id: Uuid, admin: bool) -> String {
    JwtKeys::from(&state.config.jwt)
        .sign_access(user_id, admin)
        .expect("sign access token")
}
