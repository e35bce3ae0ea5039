//! Which paths the proxy owns

/// Prefixes forwarded to the backend as plain HTTP
pub const FORWARDED_PREFIXES: &[&str] = &["/project", "/auth", "/user", "/api"];

/// Prefix tunnelled to the backend as a WebSocket
pub const TUNNEL_PREFIX: &str = "/ws";

pub const DEFAULT_LISTEN_PORT: u16 = 5173;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Forward,
    Tunnel,
}

/// Plain string-prefix match, so `/users` is owned by `/user`
pub fn route_for(path: &str) -> Option<Route> {
    if path.starts_with(TUNNEL_PREFIX) {
        return Some(Route::Tunnel);
    }
    FORWARDED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
        .then_some(Route::Forward)
}
