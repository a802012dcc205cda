//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use docserve::http::handler::RequestHandler;
use docserve::http::resolver::PathResolver;

pub const NOT_FOUND_BODY: &str = "<h1>not found</h1>";
pub const NOT_IMPLEMENTED_BODY: &str = "<h1>not implemented</h1>";

static NEXT: AtomicUsize = AtomicUsize::new(0);

/// A scratch document root, removed when dropped.
pub struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    pub fn new() -> Self {
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "docserve-test-{}-{}",
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    /// A root holding `index.html`, `401.html` and `501.html`.
    pub fn with_site() -> Self {
        let root = Self::new();
        root.write("index.html", "<h1>hi</h1>");
        root.write("401.html", NOT_FOUND_BODY);
        root.write("501.html", NOT_IMPLEMENTED_BODY);
        root
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(file, contents).unwrap();
    }

    pub fn handler(&self) -> RequestHandler {
        let resolver = PathResolver::new(&self.path, "index.html").unwrap();
        RequestHandler::new(resolver, "401.html", "501.html", 8192)
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Splits a raw response at the blank line and returns (header, body).
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let header = String::from_utf8(raw[..end + 4].to_vec()).unwrap();
    (header, raw[end + 4..].to_vec())
}

/// Reads the Content-Length value out of a header.
pub fn content_length(header: &str) -> usize {
    header
        .lines()
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .expect("header has no Content-Length")
        .trim()
        .parse()
        .unwrap()
}
