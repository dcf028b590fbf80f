//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, dispatch, and access logging.

use crate::config::Config;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Where a request path leads
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/` greeting page
    Greeting,
    /// `/data/<filename>` file lookup
    DataFile(&'a str),
    /// Anything else
    NotFound,
}

/// Match a request path against the served routes
///
/// The data route accepts exactly one path segment; empty and nested
/// names fall through to `NotFound`.
pub fn match_route(path: &str) -> Route<'_> {
    if path == "/" {
        return Route::Greeting;
    }
    if let Some(filename) = path.strip_prefix("/data/") {
        if !filename.is_empty() && !filename.contains('/') {
            return Route::DataFile(filename);
        }
    }
    Route::NotFound
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    cfg: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut entry = access_entry(&req, peer_addr);

    let response = dispatch(&req).await;

    if cfg.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes =
            usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &cfg.logging.access_log_format);
    }

    Ok(response)
}

/// Validate the method, then dispatch on the matched route
async fn dispatch(req: &Request<hyper::body::Incoming>) -> Response<Full<Bytes>> {
    let method = req.method();
    let is_head = *method == Method::HEAD;

    match method {
        &Method::GET | &Method::HEAD => {}
        &Method::OPTIONS => return http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response();
        }
    }

    match match_route(req.uri().path()) {
        Route::Greeting => static_files::serve_greeting(is_head),
        Route::DataFile(filename) => static_files::serve_data_file(filename, is_head).await,
        Route::NotFound => http::build_404_response(),
    }
}

/// Build the access log entry for a request
fn access_entry(req: &Request<hyper::body::Incoming>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header_value(req, "referer");
    entry.user_agent = header_value(req, "user-agent");
    entry
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_matches_greeting() {
        assert_eq!(match_route("/"), Route::Greeting);
    }

    #[test]
    fn data_paths_match_single_filenames() {
        assert_eq!(match_route("/data/hello.txt"), Route::DataFile("hello.txt"));
        assert_eq!(match_route("/data/.."), Route::DataFile(".."));
    }

    #[test]
    fn everything_else_is_not_found() {
        assert_eq!(match_route("/data"), Route::NotFound);
        assert_eq!(match_route("/data/"), Route::NotFound);
        assert_eq!(match_route("/data/a/b"), Route::NotFound);
        assert_eq!(match_route("/other"), Route::NotFound);
        assert_eq!(match_route(""), Route::NotFound);
    }
}
