//! Static file fallback
//!
//! Serves a file from the public directory when no route matched. Every
//! filesystem failure means "no file" and never surfaces as an error. The
//! stat and the open are separate calls, so a file that changes in between is
//! handled best effort: if the open fails the request falls through to 404.

use std::path::PathBuf;

use tokio::fs;

use crate::handler::{Body, Reply};
use crate::http::mime;
use crate::logger;

const INDEX_FILE: &str = "index.html";

/// A regular file resolved under the public directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Resolve `request_path` under `public_dir`
///
/// Directories resolve to their `index.html`. Returns `None` when nothing
/// servable exists.
pub async fn resolve(public_dir: &str, request_path: &str) -> Option<StaticFile> {
    if request_path.split('/').any(|segment| segment == "..") {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }

    let mut full_path = format!("{public_dir}{request_path}");
    let mut meta = fs::metadata(&full_path).await.ok()?;

    if meta.is_dir() {
        full_path = format!("{full_path}/{INDEX_FILE}");
        meta = fs::metadata(&full_path).await.ok()?;
    }

    if !meta.is_file() {
        return None;
    }

    Some(StaticFile {
        path: PathBuf::from(full_path),
        size: meta.len(),
    })
}

/// Build a 200 reply streaming the resolved file
///
/// The file is opened here but read lazily while the response is written.
pub async fn serve(public_dir: &str, request_path: &str) -> Option<Reply> {
    let file = resolve(public_dir, request_path).await?;
    let handle = match fs::File::open(&file.path).await {
        Ok(handle) => handle,
        Err(e) => {
            logger::log_warning(&format!(
                "File vanished before it could be opened '{}': {e}",
                file.path.display()
            ));
            return None;
        }
    };

    let mut headers = mime::resolve(&file.path);
    headers.push(("Content-Length".to_string(), file.size.to_string()));
    Some(Reply::new(200, headers, Body::File(handle)))
}
