use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id for one request. Portfolio handlers log it next to the
/// report they serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied id, if it is short printable ASCII
fn forwarded_request_id(headers: &HeaderMap) -> Option<RequestId> {
    let value = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let acceptable = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.chars().all(|c| c.is_ascii_graphic());
    acceptable.then(|| RequestId(value.to_string()))
}

/// Attach a [`RequestId`] to the request and echo it on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = forwarded_request_id(request.headers())
        .unwrap_or_else(|| RequestId(uuid::Uuid::new_v4().to_string()));

    tracing::Span::current().record("request_id", request_id.as_str());
    let header = HeaderValue::from_str(request_id.as_str()).ok();
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_forwarded_id_accepted() {
        assert_eq!(
            forwarded_request_id(&headers("trace-42")),
            Some(RequestId("trace-42".to_string()))
        );
    }

    #[test]
    fn test_unusable_ids_rejected() {
        assert!(forwarded_request_id(&HeaderMap::new()).is_none());
        assert!(forwarded_request_id(&headers("has space")).is_none());
        assert!(forwarded_request_id(&headers(&"a".repeat(200))).is_none());
    }
}
