use bytes::{BufMut, Bytes, BytesMut};

const HTTP_VERSION: &str = "HTTP/1.0";

/// Every response carries this content type; the server only deals in HTML.
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): the requested file was served
/// - `NotFound` (404): the not-found document was served
/// - `NotImplemented` (501): the not-implemented document was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    /// The full status line, without a line terminator.
    pub fn status_line(&self) -> String {
        format!("{} {} {}", HTTP_VERSION, self.as_u16(), self.reason_phrase())
    }
}

/// Synthesizes a response header.
///
/// Layout: status line, content type, content length, blank line. The
/// trailing blank line is what separates the header from the body.
pub fn build_header(status_line: &str, content_length: usize) -> Bytes {
    let header = format!(
        "{status_line}\r\nContent-Type: {CONTENT_TYPE_HTML}\r\nContent-Length: {content_length}\r\n\r\n"
    );
    Bytes::from(header)
}

/// Header bytes immediately followed by body bytes, nothing in between.
pub fn concatenate(header: &[u8], body: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(header.len() + body.len());
    buf.put_slice(header);
    buf.put_slice(body);
    buf.freeze()
}

/// A complete response, built fresh for each request.
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    /// The HTTP status code
    pub status: StatusCode,
    /// Serialized header, including the blank-line terminator
    pub header: Bytes,
    /// File contents
    pub body: Bytes,
}

impl ResponseDocument {
    /// Wraps `body` in a header declaring its exact length.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let header = build_header(&status.status_line(), body.len());
        Self {
            status,
            header,
            body,
        }
    }

    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::Ok, body)
    }

    pub fn not_found(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::NotFound, body)
    }

    pub fn not_implemented(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::NotImplemented, body)
    }

    /// Total number of bytes that go on the wire.
    pub fn wire_len(&self) -> usize {
        self.header.len() + self.body.len()
    }

    pub fn to_bytes(&self) -> Bytes {
        concatenate(&self.header, &self.body)
    }
}
