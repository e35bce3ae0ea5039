//! Forwarding and tunnelling handlers.
//!
//! Plain requests are replayed against the backend with the same method,
//! path, query, headers, and body. WebSocket handshakes are replayed too;
//! once the backend answers 101 both upgraded connections are spliced.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;
use http::header::{self, HeaderMap, HeaderName};
use http::{StatusCode, Uri};
use hyper_util::rt::TokioIo;

use crate::routes::{route_for, Route};

/// Request bodies are buffered before forwarding
const MAX_REQUEST_BODY: usize = 32 * 1024 * 1024;

/// Connection-scoped headers that must not cross the proxy
const HOP_BY_HOP: &[HeaderName] = &[
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request to {url} failed: {source}")]
    Upstream { url: String, source: reqwest::Error },

    #[error("failed to read request body: {0}")]
    RequestBody(axum::Error),

    #[error("failed to build response: {0}")]
    Response(#[from] http::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            ProxyError::RequestBody(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { .. } | ProxyError::Response(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

#[derive(Clone)]
pub struct ProxyState {
    backend: Arc<str>,
    client: reqwest::Client,
}

impl ProxyState {
    /// `backend` must already be normalized (scheme present, no trailing slash)
    pub fn new(backend: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            backend: Arc::from(backend),
            client,
        })
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    fn upstream_url(&self, uri: &Uri) -> String {
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        format!("{}{}", self.backend, path_and_query)
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new().fallback(proxy).with_state(state)
}

async fn proxy(State(state): State<ProxyState>, req: Request) -> Response {
    let path = req.uri().path().to_string();
    let result = match route_for(&path) {
        Some(Route::Tunnel) if is_upgrade_request(req.headers()) => tunnel(&state, req).await,
        Some(_) => forward(&state, req).await,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    result.unwrap_or_else(|err| {
        tracing::warn!(path = %path, error = %err, "proxy request failed");
        err.into_response()
    })
}

fn is_upgrade_request(headers: &HeaderMap) -> bool {
    let connection_upgrade = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|token| token.trim().eq_ignore_ascii_case("upgrade"));
    connection_upgrade && headers.contains_key(header::UPGRADE)
}

/// Copy of `headers` without hop-by-hop headers or Host
fn end_to_end_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP {
        out.remove(name);
    }
    out.remove("keep-alive");
    out.remove(header::HOST);
    out
}

async fn forward(state: &ProxyState, req: Request) -> Result<Response, ProxyError> {
    let url = state.upstream_url(req.uri());
    let method = req.method().clone();
    let headers = end_to_end_headers(req.headers());
    let body = axum::body::to_bytes(req.into_body(), MAX_REQUEST_BODY)
        .await
        .map_err(ProxyError::RequestBody)?;

    tracing::debug!(%method, url = %url, "forwarding");

    let upstream = state
        .client
        .request(method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|source| ProxyError::Upstream { url, source })?;

    let mut response = Response::builder().status(upstream.status());
    if let Some(out) = response.headers_mut() {
        out.extend(end_to_end_headers(upstream.headers()));
    }
    Ok(response.body(Body::from_stream(upstream.bytes_stream()))?)
}

async fn tunnel(state: &ProxyState, mut req: Request) -> Result<Response, ProxyError> {
    let url = state.upstream_url(req.uri());
    let mut headers = req.headers().clone();
    headers.remove(header::HOST);
    let client_side = hyper::upgrade::on(&mut req);

    tracing::debug!(url = %url, "opening tunnel");

    let upstream = state
        .client
        .get(&url)
        .headers(headers)
        .send()
        .await
        .map_err(|source| ProxyError::Upstream {
            url: url.clone(),
            source,
        })?;

    let status = upstream.status();
    if status != StatusCode::SWITCHING_PROTOCOLS {
        // Backend refused the handshake; hand its answer back unchanged
        let mut response = Response::builder().status(status);
        if let Some(out) = response.headers_mut() {
            out.extend(end_to_end_headers(upstream.headers()));
        }
        return Ok(response.body(Body::from_stream(upstream.bytes_stream()))?);
    }

    let mut response = Response::builder().status(StatusCode::SWITCHING_PROTOCOLS);
    if let Some(out) = response.headers_mut() {
        out.extend(upstream.headers().clone());
    }
    let response = response.body(Body::empty())?;

    tokio::spawn(async move {
        let mut backend_io = match upstream.upgrade().await {
            Ok(io) => io,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "backend upgrade failed");
                return;
            }
        };
        let mut client_io = match client_side.await {
            Ok(upgraded) => TokioIo::new(upgraded),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "client upgrade failed");
                return;
            }
        };

        match tokio::io::copy_bidirectional(&mut client_io, &mut backend_io).await {
            Ok((to_backend, to_client)) => {
                tracing::debug!(url = %url, to_backend, to_client, "tunnel closed");
            }
            Err(err) => tracing::debug!(url = %url, error = %err, "tunnel ended with error"),
        }
    });

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::Redirect;
    use axum::routing::{get, post};
    use http::HeaderValue;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn echo_upgrade(mut req: Request) -> Response {
        let on_upgrade = hyper::upgrade::on(&mut req);
        tokio::spawn(async move {
            let Ok(upgraded) = on_upgrade.await else {
                return;
            };
            let mut io = TokioIo::new(upgraded);
            let mut buf = [0u8; 64];
            while let Ok(n) = io.read(&mut buf).await {
                if n == 0 || io.write_all(&buf[..n]).await.is_err() {
                    break;
                }
            }
        });
        Response::builder()
            .status(StatusCode::SWITCHING_PROTOCOLS)
            .header(header::CONNECTION, "upgrade")
            .header(header::UPGRADE, "echo")
            .body(Body::empty())
            .unwrap()
    }

    async fn backend() -> String {
        let app = Router::new()
            .route(
                "/api/clear-history",
                post(|headers: HeaderMap, body: String| async move {
                    let client_type = headers
                        .get("x-client-type")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    (
                        StatusCode::ACCEPTED,
                        [("x-seen-client-type", client_type)],
                        format!("body={body}"),
                    )
                }),
            )
            .route(
                "/auth/config",
                get(|uri: Uri| async move { uri.query().unwrap_or_default().to_string() }),
            )
            .route("/users", get(|| async { "user list" }))
            .route("/auth/login", get(|| async { Redirect::to("/elsewhere") }))
            .route(
                "/ws/poll",
                get(|uri: Uri| async move { format!("poll {}", uri.query().unwrap_or_default()) }),
            )
            .route(
                "/ws/closed",
                get(|| async { (StatusCode::FORBIDDEN, "upgrade refused") }),
            )
            .route("/ws", get(echo_upgrade));
        serve(app).await
    }

    async fn proxy_for(backend: &str) -> String {
        serve(router(ProxyState::new(backend).unwrap())).await
    }

    #[test]
    fn test_upstream_url_keeps_path_and_query() {
        let state = ProxyState::new("http://localhost:8080").unwrap();
        let uri: Uri = "/auth/config?lang=en&x=1".parse().unwrap();
        assert_eq!(state.upstream_url(&uri), "http://localhost:8080/auth/config?lang=en&x=1");
    }

    #[test]
    fn test_end_to_end_headers_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:5173"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token=abc"));
        headers.insert("x-client-type", HeaderValue::from_static("webapp"));

        let out = end_to_end_headers(&headers);
        assert_eq!(out.len(), 2);
        assert_eq!(out[header::COOKIE], "access_token=abc");
        assert_eq!(out["x-client-type"], "webapp");
    }

    #[test]
    fn test_is_upgrade_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, Upgrade"));
        assert!(!is_upgrade_request(&headers));
        headers.insert(header::UPGRADE, HeaderValue::from_static("websocket"));
        assert!(is_upgrade_request(&headers));

        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        assert!(!is_upgrade_request(&headers));
    }

    #[tokio::test]
    async fn test_forwards_method_headers_and_body() {
        let proxy = proxy_for(&backend().await).await;

        let response = reqwest::Client::new()
            .post(format!("{proxy}/api/clear-history"))
            .header("X-Client-Type", "webapp")
            .body("payload")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()["x-seen-client-type"], "webapp");
        assert_eq!(response.text().await.unwrap(), "body=payload");
    }

    #[tokio::test]
    async fn test_forwards_query_string() {
        let proxy = proxy_for(&backend().await).await;

        let body = reqwest::get(format!("{proxy}/auth/config?lang=en"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "lang=en");
    }

    #[tokio::test]
    async fn test_backend_status_passes_through() {
        let proxy = proxy_for(&backend().await).await;

        let response = reqwest::get(format!("{proxy}/user/me")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_prefix_match_forwards_sibling_paths() {
        let proxy = proxy_for(&backend().await).await;

        let response = reqwest::get(format!("{proxy}/users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "user list");
    }

    #[tokio::test]
    async fn test_redirect_is_relayed_not_followed() {
        let proxy = proxy_for(&backend().await).await;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        let response = client.get(format!("{proxy}/auth/login")).send().await.unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/elsewhere");
    }

    #[tokio::test]
    async fn test_ws_without_upgrade_is_plain_http() {
        let proxy = proxy_for(&backend().await).await;

        let response = reqwest::get(format!("{proxy}/ws/poll?EIO=4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "poll EIO=4");
    }

    #[tokio::test]
    async fn test_oversized_body_is_bad_request() {
        let proxy = proxy_for(&backend().await).await;

        let response = reqwest::Client::new()
            .post(format!("{proxy}/api/clear-history"))
            .body(vec![b'x'; MAX_REQUEST_BODY + 1024 * 1024])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_refused_handshake_is_relayed() {
        let proxy = proxy_for(&backend().await).await;

        let response = reqwest::Client::new()
            .get(format!("{proxy}/ws/closed"))
            .header(header::CONNECTION, "upgrade")
            .header(header::UPGRADE, "echo")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.text().await.unwrap(), "upgrade refused");
    }

    #[tokio::test]
    async fn test_unowned_path_is_not_found() {
        let proxy = proxy_for(&backend().await).await;

        let response = reqwest::get(format!("{proxy}/index.html")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_bad_gateway() {
        let closed = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let proxy = proxy_for(&closed).await;

        let response = reqwest::get(format!("{proxy}/api/clear-history")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_tunnel_relays_bytes_both_ways() {
        let proxy = proxy_for(&backend().await).await;
        let addr = proxy.trim_start_matches("http://");

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let handshake = format!(
            "GET /ws HTTP/1.1\r\nHost: {addr}\r\nConnection: Upgrade\r\nUpgrade: echo\r\n\r\n"
        );
        stream.write_all(handshake.as_bytes()).await.unwrap();

        let mut head = Vec::new();
        let mut byte = [0u8; 1];
        while !head.ends_with(b"\r\n\r\n") {
            stream.read_exact(&mut byte).await.unwrap();
            head.push(byte[0]);
        }
        let head = String::from_utf8(head).unwrap();
        assert!(head.starts_with("HTTP/1.1 101"), "unexpected handshake: {head}");

        stream.write_all(b"ping").await.unwrap();
        let mut echoed = [0u8; 4];
        stream.read_exact(&mut echoed).await.unwrap();
        assert_eq!(&echoed, b"ping");
    }
}
