//! HTTP/1.0 request handling.
//!
//! Each connection carries exactly one request: a single request line is
//! read, mapped to a file under the document root, and answered with that
//! file (or a fallback document) before the connection is closed.
//!
//! # Architecture
//!
//! - **`connection`**: byte-level reader/writer over one accepted stream
//! - **`parser`**: splits a request line into method, target and version
//! - **`request`**: request line and method types
//! - **`resolver`**: maps a target to a path under the document root
//! - **`response`**: status codes, header synthesis and framing
//! - **`writer`**: writes a serialized response to the stream
//! - **`handler`**: the per-connection state machine tying it together
//!
//! # Handler State Machine
//!
//! ```text
//!        ┌──────────────────────┐
//!        │ AwaitingRequestLine  │ ← read one line
//!        └──────────┬───────────┘
//!                   │ read failure ──────────────────────┐
//!        ┌──────────┼─────────────────┐                  │
//!        ▼ GET                        ▼ anything else    │
//!  ┌───────────┐  file missing  ┌─────────────┐          │
//!  │  Serving  │ ─────────────► │  NotFound   │          │
//!  └─────┬─────┘                └──────┬──────┘          │
//!        │            ┌─────────────┐  │                 │
//!        │            │ Unsupported │  │                 │
//!        │            └──────┬──────┘  │                 │
//!        ▼                   ▼         ▼                 │
//!  ┌───────────────────────────────────────┐             │
//!  │              Responding               │             │
//!  └──────────────────┬────────────────────┘             │
//!                     ▼                                  │
//!  ┌───────────────────────────────────────┐             │
//!  │                Closed                 │ ◄───────────┘
//!  └───────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docserve::config::Config;
//! use docserve::http::{connection::Connection, handler::RequestHandler};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = Arc::new(RequestHandler::from_config(&Config::default())?);
//!     let listener = TcpListener::bind("127.0.0.1:8888").await?;
//!
//!     loop {
//!         let (socket, addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let conn = Connection::new(socket, addr.to_string());
//!             if let Err(e) = handler.handle(conn).await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod handler;
pub mod parser;
pub mod request;
pub mod resolver;
pub mod response;
pub mod writer;
