//! Docserve - concurrent HTTP/1.0 file server
//!
//! Core library for request handling and connection dispatch.

pub mod config;
pub mod http;
pub mod server;
