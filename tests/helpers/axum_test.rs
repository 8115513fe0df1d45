// ABOUTME: In-process request harness for exercising the router in integration tests
// ABOUTME: Drives requests through tower's oneshot and buffers the whole response

use axum::{
    body::{to_bytes, Body},
    http::{header, request::Builder, HeaderMap, Method, Request, Response, StatusCode},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

/// Request under construction
pub struct AxumTestRequest {
    builder: Builder,
    body: Body,
}

impl AxumTestRequest {
    fn with_method(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::with_method(Method::GET, uri)
    }

    #[allow(dead_code)]
    pub fn post(uri: &str) -> Self {
        Self::with_method(Method::POST, uri)
    }

    #[allow(dead_code)]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Serialize `payload` as the body and mark it as JSON
    #[allow(dead_code)]
    pub fn json<T: Serialize>(mut self, payload: &T) -> Self {
        let bytes = serde_json::to_vec(payload).expect("request payload serializes");
        self.builder = self
            .builder
            .header(header::CONTENT_TYPE, "application/json");
        self.body = Body::from(bytes);
        self
    }

    /// Run the request through `router`
    pub async fn send(self, router: Router) -> AxumTestResponse {
        let request = self.builder.body(self.body).expect("valid test request");
        let response = router.oneshot(request).await.expect("router is infallible");
        AxumTestResponse::collect(response).await
    }
}

/// Buffered response
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    bytes: Vec<u8>,
}

impl AxumTestResponse {
    async fn collect(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, usize::MAX)
            .await
            .expect("response body is readable")
            .to_vec();
        Self {
            status: parts.status,
            headers: parts.headers,
            bytes,
        }
    }

    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.bytes).unwrap_or_else(|e| {
            panic!(
                "response is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.bytes)
            )
        })
    }

    #[allow(dead_code)]
    pub fn text(self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
