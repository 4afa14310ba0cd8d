/// Fixed content type of every response the server sends.
pub const CONTENT_TYPE: &str = "text/html";

/// Body sent with every 404 response.
pub const NOT_FOUND_BODY: &str = "<html>\
    <head><title>Not Found</title></head>\
    <body><h1>404 Not Found</h1></body>\
    </html>";

/// Body sent with every 400 response.
pub const BAD_REQUEST_BODY: &str = "<html>\
    <head><title>Bad Request</title></head>\
    <body><h1>400 Bad Request</h1></body>\
    </html>";

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): File found and returned
/// - `BadRequest` (400): Malformed or unsafe request
/// - `NotFound` (404): No readable file at the resolved path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use warden::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// Headers keep their insertion order so the framing on the wire is
/// deterministic.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they are written
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body(b"<p>hi</p>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, replacing the value of an existing header of the same
    /// name (compared case-insensitively) in place.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// `Content-Length` is always derived from the body and placed first.
    pub fn build(mut self) -> Response {
        self.headers
            .retain(|(k, _)| !k.eq_ignore_ascii_case("Content-Length"));
        self.headers
            .insert(0, ("Content-Length".to_string(), self.body.len().to_string()));

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::html(StatusCode::Ok, body.into())
    }

    /// Creates the fixed 404 Not Found response.
    pub fn not_found() -> Self {
        Self::html(StatusCode::NotFound, NOT_FOUND_BODY.as_bytes().to_vec())
    }

    /// Creates the fixed 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::html(StatusCode::BadRequest, BAD_REQUEST_BODY.as_bytes().to_vec())
    }

    /// Value of the first header named `key`, compared case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    fn html(status: StatusCode, body: Vec<u8>) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", CONTENT_TYPE)
            .header("Connection", "close")
            .body(body)
            .build()
    }
}
