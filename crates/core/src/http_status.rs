//! Reference table of HTTP status codes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCode {
    pub code: u16,
    pub name: &'static str,
    pub description: &'static str,
}

const fn status(code: u16, name: &'static str, description: &'static str) -> StatusCode {
    StatusCode {
        code,
        name,
        description,
    }
}

pub const CODES: &[StatusCode] = &[
    // 1xx
    status(100, "Continue", "Request headers were received; the client should send the body."),
    status(101, "Switching Protocols", "The server agrees to switch protocols, e.g. HTTP/1.1 to WebSocket."),
    status(102, "Processing", "The request is being processed but no response is ready yet (WebDAV)."),
    status(103, "Early Hints", "Sent with Link headers so the client can preload resources before the final response."),
    // 2xx
    status(200, "OK", "The request succeeded."),
    status(201, "Created", "A new resource was created; the Location header usually points at it."),
    status(202, "Accepted", "The request was accepted for processing that has not finished yet."),
    status(203, "Non-Authoritative Information", "The request succeeded but a proxy modified the response."),
    status(204, "No Content", "The request succeeded and there is no body to return."),
    status(205, "Reset Content", "The request succeeded; the client should reset its document view."),
    status(206, "Partial Content", "Only the range requested by the Range header is returned."),
    status(207, "Multi-Status", "Several status codes for several independent operations (WebDAV)."),
    status(208, "Already Reported", "Members of a DAV binding were already listed in a previous reply (WebDAV)."),
    status(226, "IM Used", "The response is the result of instance manipulations applied to the resource."),
    // 3xx
    status(300, "Multiple Choices", "There are several possible responses; the client should pick one."),
    status(301, "Moved Permanently", "The resource has a new permanent URL."),
    status(302, "Found", "The resource is temporarily at another URL."),
    status(303, "See Other", "Fetch the result with GET at another URL, typically after a POST."),
    status(304, "Not Modified", "The cached copy is still valid."),
    status(307, "Temporary Redirect", "Temporary redirect that must keep the request method."),
    status(308, "Permanent Redirect", "Permanent redirect that must keep the request method."),
    // 4xx
    status(400, "Bad Request", "The request is malformed or has invalid parameters."),
    status(401, "Unauthorized", "Authentication is missing or failed."),
    status(403, "Forbidden", "The client is authenticated but not allowed to access the resource."),
    status(404, "Not Found", "The requested resource does not exist."),
    status(405, "Method Not Allowed", "The resource does not support this request method."),
    status(406, "Not Acceptable", "No representation matches the request's Accept headers."),
    status(407, "Proxy Authentication Required", "The client must authenticate with the proxy."),
    status(408, "Request Timeout", "The server gave up waiting for the request."),
    status(409, "Conflict", "The request conflicts with the current state of the resource."),
    status(410, "Gone", "The resource was permanently removed."),
    status(411, "Length Required", "A Content-Length header is required."),
    status(412, "Precondition Failed", "A conditional header such as If-Match evaluated to false."),
    status(413, "Content Too Large", "The request body exceeds the server's limit."),
    status(414, "URI Too Long", "The request URL is longer than the server will process."),
    status(415, "Unsupported Media Type", "The request body's format is not supported."),
    status(416, "Range Not Satisfiable", "The requested Range cannot be served."),
    status(417, "Expectation Failed", "The Expect header cannot be met."),
    status(418, "I'm a Teapot", "RFC 2324 joke: the teapot refuses to brew coffee."),
    status(422, "Unprocessable Content", "The request is well-formed but semantically invalid."),
    status(423, "Locked", "The resource is locked (WebDAV)."),
    status(424, "Failed Dependency", "The request failed because a previous request failed (WebDAV)."),
    status(425, "Too Early", "The server will not process a request that might be replayed."),
    status(426, "Upgrade Required", "The client must switch to another protocol."),
    status(428, "Precondition Required", "The request must be conditional."),
    status(429, "Too Many Requests", "The client is being rate limited."),
    status(431, "Request Header Fields Too Large", "One or more request headers are too large."),
    status(451, "Unavailable For Legal Reasons", "The resource is withheld for legal reasons."),
    // 5xx
    status(500, "Internal Server Error", "The server hit an unexpected condition."),
    status(501, "Not Implemented", "The server does not support the requested functionality."),
    status(502, "Bad Gateway", "An upstream server returned an invalid response."),
    status(503, "Service Unavailable", "The server is overloaded or down for maintenance."),
    status(504, "Gateway Timeout", "An upstream server did not respond in time."),
    status(505, "HTTP Version Not Supported", "The HTTP version of the request is not supported."),
    status(506, "Variant Also Negotiates", "Content negotiation ended in a circular reference."),
    status(507, "Insufficient Storage", "The server cannot store what is needed to complete the request (WebDAV)."),
    status(508, "Loop Detected", "An infinite loop was detected while processing the request (WebDAV)."),
    status(510, "Not Extended", "Further extensions to the request are required."),
    status(511, "Network Authentication Required", "The client must authenticate to gain network access."),
];

pub fn lookup(code: u16) -> Option<&'static StatusCode> {
    CODES.iter().find(|s| s.code == code)
}

/// Match by code prefix, or by name or description substring (case-insensitive).
pub fn search(query: &str) -> Vec<&'static StatusCode> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return CODES.iter().collect();
    }
    CODES
        .iter()
        .filter(|s| {
            s.code.to_string().starts_with(&query)
                || s.name.to_lowercase().contains(&query)
                || s.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// All codes of a class, `class` being the leading digit (1-5).
pub fn by_class(class: u16) -> Vec<&'static StatusCode> {
    CODES.iter().filter(|s| s.code / 100 == class).collect()
}

pub fn class_label(code: u16) -> Option<&'static str> {
    match code / 100 {
        1 => Some("1xx Informational"),
        2 => Some("2xx Success"),
        3 => Some("3xx Redirection"),
        4 => Some("4xx Client Error"),
        5 => Some("5xx Server Error"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(CODES.windows(2).all(|w| w[0].code < w[1].code));
        assert!(CODES.iter().all(|s| class_label(s.code).is_some()));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(404).map(|s| s.name), Some("Not Found"));
        assert_eq!(lookup(418).map(|s| s.name), Some("I'm a Teapot"));
        assert_eq!(lookup(299), None);
    }

    #[test]
    fn test_search_by_code_prefix() {
        let codes: Vec<u16> = search("50").iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![500, 501, 502, 503, 504, 505, 506, 507, 508]);
    }

    #[test]
    fn test_search_by_text() {
        let codes: Vec<u16> = search("TEAPOT").iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![418]);
        assert!(search("webdav").iter().any(|s| s.code == 207));
        assert_eq!(search("").len(), CODES.len());
        assert!(search("zzzz").is_empty());
    }

    #[test]
    fn test_by_class() {
        let informational: Vec<u16> = by_class(1).iter().map(|s| s.code).collect();
        assert_eq!(informational, vec![100, 101, 102, 103]);
        assert!(by_class(6).is_empty());
    }

    #[test]
    fn test_class_label() {
        assert_eq!(class_label(204), Some("2xx Success"));
        assert_eq!(class_label(451), Some("4xx Client Error"));
        assert_eq!(class_label(600), None);
    }
}
