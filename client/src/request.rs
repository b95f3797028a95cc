//! Transport-ready request descriptor and reply normalization.
//!
//! # Design
//! `HttpRequest` is immutable plain data owned by the call that builds it.
//! `perform` renders it into a `TransportCall`, runs it once and turns the
//! `RawReply` into an `HttpResponse` or an `ApiError`. Status codes pass
//! through untouched: a 404 is a perfectly good `HttpResponse` here.

use ::http::StatusCode;
use tracing::{debug, trace};
use url::Url;

use crate::error::ApiError;
use crate::http::{Header, Headers, HttpMethod, HttpResponse};
use crate::transport::{RawReply, Transport, TransportCall};

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: Vec<Header>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            url,
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = Header>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_body(mut self, body: Option<Vec<u8>>) -> Self {
        self.body = body;
        self
    }

    /// Render headers to `(key, value)` pairs in order, without deduplication.
    pub fn to_transport_call(&self) -> TransportCall {
        TransportCall {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.iter().map(Header::to_pair).collect(),
            body: self.body.clone(),
        }
    }

    /// Run the request once over `transport`.
    ///
    /// Transport failures become `ApiError::Unknown`, replies without a usable
    /// status become `ApiError::InvalidResponse`.
    pub async fn perform<T: Transport>(&self, transport: &T) -> Result<HttpResponse, ApiError> {
        debug!(method = %self.method, url = %self.url, "sending request");
        let reply = transport
            .execute(self.to_transport_call())
            .await
            .map_err(ApiError::Unknown)?;
        normalize(reply)
    }
}

/// Turn a raw transport reply into an `HttpResponse`.
///
/// Header entries whose key or value is not UTF-8 are dropped. An empty body
/// is reported as no body.
pub fn normalize(reply: RawReply) -> Result<HttpResponse, ApiError> {
    let status_code = reply
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or(ApiError::InvalidResponse)?
        .as_u16();

    let mut headers = Headers::with_capacity(reply.headers.len());
    for (key, value) in reply.headers {
        match (String::from_utf8(key), String::from_utf8(value)) {
            (Ok(key), Ok(value)) => {
                headers.insert(key, value);
            }
            (key, _) => trace!(key = ?key.ok(), "dropping non-text response header"),
        }
    }

    let data = reply.body.filter(|body| !body.is_empty());
    debug!(
        status = status_code,
        body_len = data.as_ref().map_or(0, Vec::len),
        "received response"
    );

    Ok(HttpResponse {
        status_code,
        headers,
        data,
    })
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Mutex;

    use super::*;
    use crate::error::TransportError;
    use crate::http::MimeType;

    /// Records the call it was given and answers with a canned result.
    struct Canned {
        seen: Mutex<Option<TransportCall>>,
        reply: fn() -> Result<RawReply, TransportError>,
    }

    impl Canned {
        fn new(reply: fn() -> Result<RawReply, TransportError>) -> Self {
            Self {
                seen: Mutex::new(None),
                reply,
            }
        }
    }

    impl Transport for Canned {
        fn execute(
            &self,
            call: TransportCall,
        ) -> impl Future<Output = Result<RawReply, TransportError>> + Send {
            *self.seen.lock().unwrap() = Some(call);
            let reply = (self.reply)();
            async move { reply }
        }
    }

    fn request() -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Post,
            Url::parse("http://localhost:3000/todos").unwrap(),
        )
    }

    #[test]
    fn transport_call_keeps_header_order_and_duplicates() {
        let req = request()
            .with_header(Header::ContentType(MimeType::Json))
            .with_header(Header::Custom("X-A".into(), "1".into()))
            .with_header(Header::Custom("X-A".into(), "2".into()))
            .with_body(Some(b"{}".to_vec()));
        let call = req.to_transport_call();
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.url.as_str(), "http://localhost:3000/todos");
        assert_eq!(
            call.headers,
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("X-A".to_string(), "1".to_string()),
                ("X-A".to_string(), "2".to_string()),
            ]
        );
        assert_eq!(call.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn normalize_copies_text_headers_and_drops_others() {
        let reply = RawReply {
            status: Some(200),
            headers: vec![
                (b"Content-Type".to_vec(), b"application/json".to_vec()),
                (b"X-Binary".to_vec(), vec![0xff, 0x00]),
                (vec![0xc3, 0x28], b"value".to_vec()),
            ],
            body: Some(b"[]".to_vec()),
        };
        let response = normalize(reply).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.data.as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn normalize_keeps_header_case() {
        let reply = RawReply {
            status: Some(204),
            headers: vec![(b"x-request-id".to_vec(), b"abc".to_vec())],
            body: None,
        };
        let response = normalize(reply).unwrap();
        assert_eq!(response.headers.get("x-request-id").map(String::as_str), Some("abc"));
        assert!(response.headers.get("X-Request-Id").is_none());
    }

    #[test]
    fn normalize_treats_empty_body_as_absent() {
        let reply = RawReply {
            status: Some(404),
            headers: Vec::new(),
            body: Some(Vec::new()),
        };
        let response = normalize(reply).unwrap();
        assert_eq!(response.status_code, 404);
        assert!(response.data.is_none());
    }

    #[test]
    fn normalize_rejects_missing_status() {
        let err = normalize(RawReply::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse));
    }

    #[test]
    fn normalize_rejects_out_of_range_status() {
        let reply = RawReply {
            status: Some(42),
            ..RawReply::default()
        };
        assert!(matches!(normalize(reply), Err(ApiError::InvalidResponse)));
    }

    #[tokio::test]
    async fn perform_maps_transport_failure_to_unknown() {
        let transport = Canned::new(|| Err("connection refused".into()));
        let err = request().perform(&transport).await.unwrap_err();
        match err {
            ApiError::Unknown(cause) => assert_eq!(cause.to_string(), "connection refused"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn perform_does_not_interpret_status() {
        let transport = Canned::new(|| {
            Ok(RawReply {
                status: Some(500),
                headers: Vec::new(),
                body: Some(b"boom".to_vec()),
            })
        });
        let response = request().perform(&transport).await.unwrap();
        assert_eq!(response.status_code, 500);
        assert_eq!(response.text(), Some("boom"));
    }

    #[tokio::test]
    async fn perform_sends_rendered_call() {
        let transport = Canned::new(|| {
            Ok(RawReply {
                status: Some(200),
                ..RawReply::default()
            })
        });
        let req = request().with_header(Header::Authorization("abc".into()));
        req.perform(&transport).await.unwrap();
        let seen = transport.seen.lock().unwrap().take().unwrap();
        assert_eq!(
            seen.headers,
            vec![("Authorization".to_string(), "Bearer abc".to_string())]
        );
    }
}
