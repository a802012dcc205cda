/// HTTP request methods.
///
/// Only GET is served. Everything else, including an empty token or a
/// lowercase `get`, is kept verbatim in `Other` and answered with the
/// not-implemented document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// Any other token, exactly as the client sent it
    Other(String),
}

impl Method {
    /// Classifies a method token.
    ///
    /// The match is exact and case-sensitive: `get` and `Get` are not GET.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::Other(token) => token,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Method::GET)
    }
}

/// The first line a client sends, split into its three tokens.
///
/// `target` and `version` are empty strings when the client omitted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The HTTP method (first token)
    pub method: Method,
    /// The request target (e.g., "/index.html")
    pub target: String,
    /// Protocol version (typically "HTTP/1.0"), possibly empty
    pub version: String,
}

impl RequestLine {
    /// Whether the version token looks like an HTTP version.
    pub fn has_http_version(&self) -> bool {
        self.version.starts_with("HTTP/")
    }
}
