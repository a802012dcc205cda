use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::parser::parse_request_line;
use crate::http::request::RequestLine;
use crate::http::resolver::PathResolver;
use crate::http::response::{ResponseDocument, StatusCode};

/// Where a request is in its single pass through the handler.
enum HandlerState {
    AwaitingRequestLine,
    Serving(RequestLine),
    NotFound,
    Unsupported(RequestLine),
    Responding(ResponseDocument),
    Closed(StatusCode),
}

/// Serves exactly one request per connection from the document root.
///
/// Holds only immutable state, so one instance is shared by every
/// connection task.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    resolver: PathResolver,
    not_found_page: String,
    not_implemented_page: String,
    max_request_line: usize,
}

impl RequestHandler {
    pub fn new(
        resolver: PathResolver,
        not_found_page: impl Into<String>,
        not_implemented_page: impl Into<String>,
        max_request_line: usize,
    ) -> Self {
        Self {
            resolver,
            not_found_page: not_found_page.into(),
            not_implemented_page: not_implemented_page.into(),
            max_request_line,
        }
    }

    /// Builds a handler from configuration, validating the document root.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let resolver = PathResolver::new(&cfg.document_root, cfg.default_index.clone())?;
        Ok(Self::new(
            resolver,
            cfg.not_found_page.clone(),
            cfg.not_implemented_page.clone(),
            cfg.max_request_line,
        ))
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Handles one request and closes the connection.
    ///
    /// The connection is closed on every path out of here, whether a
    /// response was written or not. Returns the status that was sent.
    pub async fn handle<S>(&self, mut conn: Connection<S>) -> anyhow::Result<StatusCode>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let result = self.run(&mut conn).await;
        conn.close().await;
        result
    }

    async fn run<S>(&self, conn: &mut Connection<S>) -> anyhow::Result<StatusCode>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut state = HandlerState::AwaitingRequestLine;

        loop {
            state = match state {
                HandlerState::AwaitingRequestLine => {
                    let line = conn
                        .read_line(self.max_request_line)
                        .await
                        .context("failed to read request line")?;
                    let request = parse_request_line(&line);
                    tracing::debug!(
                        method = request.method.as_str(),
                        uri = %request.target,
                        version = %request.version,
                        "Request line received"
                    );

                    if request.method.is_supported() {
                        HandlerState::Serving(request)
                    } else {
                        HandlerState::Unsupported(request)
                    }
                }

                HandlerState::Serving(request) => match self.load_target(&request.target).await {
                    Some(body) => {
                        if !request.has_http_version() {
                            tracing::debug!(version = %request.version, "Serving request without HTTP version");
                        }
                        HandlerState::Responding(ResponseDocument::ok(body))
                    }
                    None => HandlerState::NotFound,
                },

                HandlerState::NotFound => {
                    tracing::info!("File not found");
                    let body = self.load_fallback(&self.not_found_page).await?;
                    HandlerState::Responding(ResponseDocument::not_found(body))
                }

                HandlerState::Unsupported(request) => {
                    tracing::info!(method = request.method.as_str(), "Method not implemented");
                    let body = self.load_fallback(&self.not_implemented_page).await?;
                    HandlerState::Responding(ResponseDocument::not_implemented(body))
                }

                HandlerState::Responding(response) => {
                    let sent = conn
                        .write_response(&response)
                        .await
                        .with_context(|| format!("failed to send response to {}", conn.peer()))?;
                    tracing::info!(status = response.status.as_u16(), bytes = sent, "Page sent");
                    HandlerState::Closed(response.status)
                }

                HandlerState::Closed(status) => return Ok(status),
            };
        }
    }

    /// Reads the file a GET target names, or `None` if it cannot be served.
    async fn load_target(&self, target: &str) -> Option<Bytes> {
        let candidate = match self.resolver.resolve(target) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!(uri = target, reason = ?e, "Rejected request target");
                return None;
            }
        };

        let path = match self.resolver.confine(&candidate).await {
            Ok(Some(path)) => path,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(uri = target, reason = ?e, "Rejected request target");
                return None;
            }
        };

        read_file(&path).await.ok()
    }

    /// Reads a fallback document. There is nothing to fall back to if it is
    /// missing or lies outside the root, so either is an error for the request.
    async fn load_fallback(&self, name: &str) -> anyhow::Result<Bytes> {
        let candidate = self.resolver.fallback(name);
        let path = match self.resolver.confine(&candidate).await {
            Ok(Some(path)) => path,
            Ok(None) => anyhow::bail!("fallback document {} does not exist", candidate.display()),
            Err(e) => anyhow::bail!("fallback document {} rejected: {:?}", candidate.display(), e),
        };

        read_file(&path)
            .await
            .with_context(|| format!("fallback document {} is unreadable", path.display()))
    }
}

async fn read_file(path: &Path) -> std::io::Result<Bytes> {
    tokio::fs::read(path).await.map(Bytes::from)
}
