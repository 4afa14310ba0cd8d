/// HTTP request methods.
///
/// Every method is recognised so it can be logged, but only `GET` is
/// served. Everything else is answered with 400 Bad Request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a known method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use warden::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    /// Whether this method asks for a resource to be returned.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Method::GET)
    }
}

/// The request line of one client request.
///
/// Only the first two tokens of the request are kept. Headers, version and
/// body are never looked at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The method token exactly as sent (e.g. "GET")
    pub method: String,
    /// The request target with any query string removed (e.g. "/index.html")
    pub target: String,
}

impl Request {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
        }
    }

    /// The method as a known [`Method`], if it is one.
    pub fn method(&self) -> Option<Method> {
        Method::from_str(&self.method)
    }

    /// True when the method is a known retrieval verb.
    pub fn is_retrieval(&self) -> bool {
        self.method().is_some_and(|m| m.is_retrieval())
    }
}
