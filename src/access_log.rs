use std::net::SocketAddr;

use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use tracing::info;

/// Fields of one Apache combined-format log line.
#[derive(Debug)]
pub struct AccessEntry {
    pub remote_addr: Option<String>,
    pub time: DateTime<Utc>,
    pub request_line: String,
    pub status: u16,
    pub bytes: Option<u64>,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

impl AccessEntry {
    pub fn combined(&self) -> String {
        let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        format!(
            "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
            dash(&self.remote_addr),
            self.time.format("%d/%b/%Y:%H:%M:%S +0000"),
            self.request_line,
            self.status,
            self.bytes.map_or_else(|| "-".to_string(), |b| b.to_string()),
            dash(&self.referer),
            dash(&self.user_agent),
        )
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Middleware writing one combined-format line per request to the `access`
/// tracing target.
pub async fn access_log(req: Request, next: Next) -> Response {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let request_line = format!("{} {} {:?}", req.method(), req.uri(), req.version());
    let referer = header_value(req.headers(), header::REFERER);
    let user_agent = header_value(req.headers(), header::USER_AGENT);
    let time = Utc::now();

    let response = next.run(req).await;

    let bytes = header_value(response.headers(), header::CONTENT_LENGTH)
        .and_then(|v| v.parse().ok())
        .or_else(|| response.body().size_hint().exact());

    let entry = AccessEntry {
        remote_addr,
        time,
        request_line,
        status: response.status().as_u16(),
        bytes,
        referer,
        user_agent,
    };
    info!(target: "access", "{}", entry.combined());

    response
}
