//! One `tracing` event per HTTP request.
//!
//! Scrapes of `/metrics` log at debug, since Prometheus hits them every few
//! seconds. Anything else is logged at info, and server errors at warn.
//! Unknown paths are logged as `other` rather than echoing the raw path.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Metrics,
    Other,
}

impl Route {
    fn of(path: &str) -> Self {
        if path == "/metrics" {
            Route::Metrics
        } else {
            Route::Other
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Route::Metrics => "metrics",
            Route::Other => "other",
        }
    }
}

pub async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let route = Route::of(req.uri().path());
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let render_us = started.elapsed().as_micros() as u64;
    let route_name = route.as_str();

    if response.status().is_server_error() {
        warn!(%method, route = route_name, status, render_us, "request failed");
    } else if route == Route::Metrics {
        debug!(%method, route = route_name, status, render_us, "scrape served");
    } else {
        info!(%method, route = route_name, status, render_us, "request served");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/metrics", get(|| async { "up 1\n" }))
            .fallback(|| async { (StatusCode::NOT_FOUND, "nope") })
            .layer(middleware::from_fn(access_log))
    }

    async fn call(path: &str) -> Response {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        app().oneshot(req).await.unwrap()
    }

    #[test]
    fn routes_are_bucketed() {
        assert_eq!(Route::of("/metrics"), Route::Metrics);
        assert_eq!(Route::of("/metrics/"), Route::Other);
        assert_eq!(Route::of("/"), Route::Other);
        assert_eq!(Route::Other.as_str(), "other");
    }

    #[tokio::test]
    async fn responses_pass_through_untouched() {
        let resp = call("/metrics").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"up 1\n");

        let resp = call("/missing").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"nope");
    }
}
