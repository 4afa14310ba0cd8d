use crate::http::request::Request;

/// Extracts the method and target from the bytes of one read.
///
/// The method and target are the first two ASCII-whitespace separated
/// tokens. Missing tokens come back as empty strings, which the session
/// answers with 400. A query string is cut off at the first `?`.
pub fn parse_http_request(buf: &[u8]) -> Request {
    let mut tokens = buf
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty());

    let method = tokens.next().map(token_to_string).unwrap_or_default();
    let target = tokens.next().map(token_to_string).unwrap_or_default();

    Request {
        method,
        target: strip_query(&target).to_string(),
    }
}

/// Drops everything from the first `?` onward.
pub fn strip_query(target: &str) -> &str {
    match target.find('?') {
        Some(idx) => &target[..idx],
        None => target,
    }
}

fn token_to_string(token: &[u8]) -> String {
    String::from_utf8_lossy(token).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n";

        let parsed = parse_http_request(req);

        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.target, "/");
    }

    #[test]
    fn query_is_stripped() {
        let parsed = parse_http_request(b"GET /search?q=rust HTTP/1.0\r\n\r\n");
        assert_eq!(parsed.target, "/search");
    }
}
