use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};
use uuid::Uuid;

const REDACTED_HEADERS: [&str; 2] = ["authorization", "cookie"];

pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    info!(%request_id, %method, %path, headers = %redacted_headers(request.headers()), "request");

    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_client_error() || status.is_server_error() {
        warn!(%request_id, %method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        info!(%request_id, status = status.as_u16(), elapsed_ms, "response");
    }
    response
}

/// Header dump safe for logs: credentials are replaced by a marker.
pub fn redacted_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if REDACTED_HEADERS.contains(&name.as_str()) {
                "[FILTERED]"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            format!("{}={}", name, shown)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn credentials_never_reach_logs() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer secret"));
        headers.insert("cookie", HeaderValue::from_static("token=secret"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let rendered = redacted_headers(&headers);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("accept=application/json"));
        assert!(rendered.contains("authorization=[FILTERED]"));
    }
}
