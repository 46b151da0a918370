//! Request pipeline
//!
//! Entry point for HTTP request processing: dispatch to a registered route,
//! fall back to the public directory, and normalize whatever came out into a
//! wire response.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, CONTENT_LENGTH, REFERER, SERVER, USER_AGENT};
use hyper::{Request, Response};

use crate::config::AppState;
use crate::dispatch::{split_target, Dispatch};
use crate::error::BoxError;
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// Never fails: every outcome, including handler errors, is a complete
/// response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let entry = state
        .config
        .logging
        .access_log
        .then(|| access_entry(&req, peer));

    let path = req.uri().path().to_string();
    let mut response = match state.dispatcher.dispatch(req).await {
        Ok(Dispatch::Matched(reply)) => http::normalize(reply),
        Ok(Dispatch::NoRoute) => serve_fallback(&state, &path).await,
        Err(e) => http::render_dispatch_error(&e),
    };

    set_server_header(&mut response, &state.config.http.server_name);

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Static file if enabled and present, otherwise 404
async fn serve_fallback(state: &AppState, path: &str) -> Response<ResponseBody> {
    let static_files = &state.config.static_files;
    if static_files.enabled {
        if let Some(reply) = static_files::serve(&static_files.public_dir, path).await {
            return http::normalize(reply);
        }
    }
    http::not_found()
}

fn set_server_header(response: &mut Response<ResponseBody>, server_name: &str) {
    if server_name.is_empty() {
        return;
    }
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(_) => logger::log_warning(&format!("Invalid server name '{server_name}', header skipped")),
    }
}

fn access_entry<B>(req: &Request<B>, peer: SocketAddr) -> AccessLogEntry {
    let target = req.uri().path_and_query().map_or("/", |pq| pq.as_str());
    let (path, query) = split_target(target);
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer.ip().to_string(),
        req.method().to_string(),
        path.to_string(),
    );
    entry.query = query.map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::HandlerError;
    use crate::handler::{handler_fn, Context, Reply};
    use crate::routing::{Method, RouteTable};
    use http_body_util::{BodyExt, Full};
    use std::fs;

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    fn state(public_dir: &str, static_enabled: bool) -> Arc<AppState> {
        let mut config = Config::default();
        config.logging.access_log = false;
        config.static_files.public_dir = public_dir.to_string();
        config.static_files.enabled = static_enabled;

        let mut routes = RouteTable::new();
        routes.register(
            Method::Get,
            "/hi",
            handler_fn(|_ctx: Context| async { Ok::<_, HandlerError>((200, "hello")) }),
        );
        routes.register(
            Method::Get,
            "/teapot",
            handler_fn(|_ctx: Context| async { Err::<Reply, _>(HandlerError::Status(403)) }),
        );
        Arc::new(AppState::new(config, routes))
    }

    fn get(uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn body_string(response: Response<ResponseBody>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_route_reply() {
        let response = handle_request(get("/hi"), state("public", false), peer())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()[SERVER], "plainroute");
        assert_eq!(response.headers()[CONTENT_LENGTH], "5");
        assert_eq!(body_string(response).await, "hello");
    }

    #[tokio::test]
    async fn test_status_signal() {
        let response = handle_request(get("/teapot"), state("public", false), peer())
            .await
            .unwrap();
        assert_eq!(response.status(), 403);
        assert_eq!(body_string(response).await, "Forbidden");
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();
        let state = state(dir.path().to_str().unwrap(), true);

        let response = handle_request(get("/style.css"), state, peer()).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()[CONTENT_LENGTH], "7");
        assert_eq!(response.headers()["content-type"], "text/css; charset=utf-8");
        assert_eq!(body_string(response).await, "body {}");
    }

    #[tokio::test]
    async fn test_static_disabled_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();
        let state = state(dir.path().to_str().unwrap(), false);

        let response = handle_request(get("/style.css"), state, peer()).await.unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(body_string(response).await, "Not Found");
    }

    #[tokio::test]
    async fn test_route_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hi"), "from disk").unwrap();
        let state = state(dir.path().to_str().unwrap(), true);

        let response = handle_request(get("/hi"), state, peer()).await.unwrap();
        assert_eq!(body_string(response).await, "hello");
    }

    #[test]
    fn test_access_entry() {
        let req = Request::builder()
            .method("POST")
            .uri("/echo?x=1")
            .header(USER_AGENT, "curl/8.0")
            .body(())
            .unwrap();
        let entry = access_entry(&req, peer());
        assert_eq!(entry.remote_addr, "127.0.0.1");
        assert_eq!(entry.method, "POST");
        assert_eq!(entry.path, "/echo");
        assert_eq!(entry.query.as_deref(), Some("x=1"));
        assert_eq!(entry.http_version, "1.1");
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert!(entry.referer.is_none());
    }
}
