use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{Data, Response};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use std::net::IpAddr;
use tracing::{info, warn};
use uuid::Uuid;

/// Correlates log lines, the `X-Request-Id` header and the reference in 5xx messages.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::new_v4().to_string())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Id assigned by [`RequestLogger`], or `"unknown"` when the fairing is not attached.
pub(crate) fn request_id_of(request: &Request<'_>) -> String {
    request
        .local_cache(|| None::<RequestId>)
        .as_ref()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Tags each request with a [`RequestId`], logs it in and out, and sets the
/// response headers shared by every endpoint (`X-Request-Id`, nosniff, no-store).
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request id and access log",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        let id = request.local_cache(|| Some(RequestId::new())).clone();
        let request_id = id.map(|id| id.0).unwrap_or_default();

        info!(request_id = %request_id, method = %request.method(), uri = %request.uri(), "request received");
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let request_id = request_id_of(request);

        response.set_header(Header::new("X-Request-Id", request_id.clone()));
        response.set_header(Header::new("X-Content-Type-Options", "nosniff"));
        response.set_header(Header::new("Cache-Control", "no-store"));

        let status = response.status();
        if status.class().is_success() || status.class().is_informational() || status.class().is_redirection() {
            info!(request_id = %request_id, method = %request.method(), uri = %request.uri(), status = status.code, "request handled");
        } else {
            warn!(request_id = %request_id, method = %request.method(), uri = %request.uri(), status = status.code, "request failed");
        }
    }
}

// ── UserAgent guard ───────────────────────────────────────────────────────────

/// Browser or client string stored on the login session. Blank headers count as absent.
pub struct UserAgent(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserAgent {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, ()> {
        let agent = req.headers().get_one("User-Agent").map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        Outcome::Success(UserAgent(agent))
    }
}

impl<'a> OpenApiFromRequest<'a> for UserAgent {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}

// ── ClientIp guard ────────────────────────────────────────────────────────────

/// Network origin of the caller, as reported by proxies or the socket.
pub struct ClientIp(pub Option<String>);

/// First non-empty `X-Forwarded-For` entry, then `X-Real-IP`, then the peer address.
pub(crate) fn resolve_client_ip(forwarded_for: Option<&str>, real_ip: Option<&str>, peer: Option<IpAddr>) -> Option<String> {
    let forwarded = forwarded_for.and_then(|value| value.split(',').next()).map(str::trim).filter(|v| !v.is_empty());
    let real = real_ip.map(str::trim).filter(|v| !v.is_empty());

    forwarded.or(real).map(str::to_string).or_else(|| peer.map(|ip| ip.to_string()))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, ()> {
        let headers = req.headers();
        let ip = resolve_client_ip(
            headers.get_one("X-Forwarded-For"),
            headers.get_one("X-Real-IP"),
            req.remote().map(|addr| addr.ip()),
        );
        Outcome::Success(ClientIp(ip))
    }
}

impl<'a> OpenApiFromRequest<'a> for ClientIp {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}
