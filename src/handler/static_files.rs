//! Data file serving module
//!
//! Resolves requested filenames inside the data directory and builds the
//! file or not-found responses.

use crate::http::{self, mime};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Directory served by `/data/<filename>`, relative to the working directory.
const DATA_DIR: &str = "data";

/// Fixed greeting served on `/`.
const GREETING_HTML: &str = "<h1>Hello from inside the very basic web server...</h1>";

/// Serve the greeting page
pub fn serve_greeting(is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(GREETING_HTML.to_string(), is_head)
}

/// Serve a file from the data directory
pub async fn serve_data_file(filename: &str, is_head: bool) -> Response<Full<Bytes>> {
    match load_data_file(filename).await {
        Some((content, content_type)) => {
            http::build_file_response(Bytes::from(content), content_type, is_head)
        }
        None => http::build_missing_file_response(),
    }
}

/// Load a file from the data directory
///
/// Every failure folds into `None`: missing file, unreadable file, a
/// directory, or a name that does not resolve. Callers answer all of them
/// with the same not-found response.
pub async fn load_data_file(filename: &str) -> Option<(Vec<u8>, &'static str)> {
    let file_path = resolve_data_path(filename)?;
    let content = fs::read(&file_path).await.ok()?;
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Resolve a requested filename against the data directory
///
/// Only a single normal path component is accepted, so a request cannot
/// escape the data directory.
fn resolve_data_path(filename: &str) -> Option<PathBuf> {
    let candidate = Path::new(filename);
    let mut components = candidate.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(Path::new(DATA_DIR).join(name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn greeting_is_always_ok() {
        let response = serve_greeting(false);
        assert_eq!(response.status(), 200);
        let body = body_bytes(response).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("Hello from inside"));
    }

    #[tokio::test]
    async fn existing_data_file_round_trips() {
        let response = serve_data_file("hello.txt", false).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_bytes(response).await,
            Bytes::from(std::fs::read("data/hello.txt").unwrap())
        );
    }

    #[tokio::test]
    async fn missing_data_file_gets_not_found_message() {
        let response = serve_data_file("nao-existe.txt", false).await;
        assert_eq!(response.status(), 404);
        assert_eq!(
            body_bytes(response).await,
            Bytes::from("Arquivo não encontrado")
        );
    }

    #[test]
    fn resolve_accepts_plain_filenames() {
        assert_eq!(
            resolve_data_path("hello.txt"),
            Some(PathBuf::from("data/hello.txt"))
        );
        assert_eq!(
            resolve_data_path("no-extension"),
            Some(PathBuf::from("data/no-extension"))
        );
    }

    #[test]
    fn resolve_rejects_escaping_names() {
        assert_eq!(resolve_data_path(".."), None);
        assert_eq!(resolve_data_path("../Cargo.toml"), None);
        assert_eq!(resolve_data_path("a/b"), None);
        assert_eq!(resolve_data_path("/etc/passwd"), None);
        assert_eq!(resolve_data_path(""), None);
        assert_eq!(resolve_data_path("."), None);
    }

    #[tokio::test]
    async fn load_returns_file_bytes_and_type() {
        // Tests run from the crate root, next to the shipped data directory.
        let (content, content_type) = load_data_file("hello.txt").await.unwrap();
        assert_eq!(content, std::fs::read("data/hello.txt").unwrap());
        assert_eq!(content_type, "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn load_folds_missing_file_into_none() {
        assert!(load_data_file("no-such-file.txt").await.is_none());
    }

    #[tokio::test]
    async fn load_folds_traversal_into_none() {
        assert!(load_data_file("../Cargo.toml").await.is_none());
        assert!(load_data_file("..").await.is_none());
    }
}
