//! Typed request dispatch and the feather API client.
//!
//! # Design
//! `FeatherClient` holds configuration only: the base URL, a transport, a
//! codec and a weak delegate handle. Every call builds its own URL, request,
//! encoder and decoder, so one client can serve any number of concurrent
//! calls without locking.
//!
//! Calls are futures. Building the future does nothing; the request goes out
//! on first poll and the future resolves exactly once. Dropping it cancels
//! whatever the transport allows to be cancelled.
//!
//! `send` never looks at the status code. A 404 with an empty body is
//! `Ok(Content { status_code: 404, content: None, .. })`; mapping statuses to
//! `ApiError::NotFound` and friends is left to the caller.

use std::fmt;
use std::sync::{Arc, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::codec::{BodyDecoder, BodyEncoder, Codec, JsonCodec};
use crate::delegate::ClientDelegate;
use crate::error::ApiError;
use crate::http::{Content, EmptyContent, Header, HttpMethod, HttpResponse, MimeType};
use crate::request::HttpRequest;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Todo, VariableListObject};
use crate::url::build_url;

/// Client for a feather JSON API.
#[derive(Clone)]
pub struct FeatherClient<T = UreqTransport, C = JsonCodec> {
    base_url: String,
    transport: T,
    codec: C,
    delegate: Option<Weak<dyn ClientDelegate>>,
}

impl FeatherClient {
    /// Client over the default ureq transport and JSON codec.
    ///
    /// `base_url` is validated on every call; a malformed one panics there.
    pub fn new(base_url: impl Into<String>, delegate: Option<&Arc<dyn ClientDelegate>>) -> Self {
        Self {
            base_url: base_url.into(),
            transport: UreqTransport::new(),
            codec: JsonCodec::default(),
            delegate: delegate.map(Arc::downgrade),
        }
    }
}

impl<T, C> FeatherClient<T, C> {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_transport<T2: Transport>(self, transport: T2) -> FeatherClient<T2, C> {
        FeatherClient {
            base_url: self.base_url,
            transport,
            codec: self.codec,
            delegate: self.delegate,
        }
    }

    pub fn with_codec<C2: Codec>(self, codec: C2) -> FeatherClient<T, C2> {
        FeatherClient {
            base_url: self.base_url,
            transport: self.transport,
            codec,
            delegate: self.delegate,
        }
    }

    /// Attach a delegate without taking ownership of it.
    pub fn with_delegate<D: ClientDelegate + 'static>(mut self, delegate: &Arc<D>) -> Self {
        let weak = Arc::downgrade(delegate) as Weak<dyn ClientDelegate>;
        self.delegate = Some(weak);
        self
    }

    /// The delegate, if one was attached and is still alive.
    pub fn delegate(&self) -> Option<Arc<dyn ClientDelegate>> {
        self.delegate.as_ref()?.upgrade()
    }

    /// Current bearer token from a live delegate.
    pub fn bearer_token(&self) -> Option<String> {
        self.delegate()?.token()
    }

    /// Request target for `path` under the base URL.
    ///
    /// # Panics
    /// If the base URL is malformed.
    pub fn url(&self, path: &str, query: &[(&str, &str)], fragment: Option<&str>) -> Url {
        build_url(&self.base_url, path, query, fragment)
    }
}

impl<T: Transport, C: Codec> FeatherClient<T, C> {
    /// Send raw body bytes and return the raw response.
    pub async fn send_raw(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Vec<Header>,
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest::new(method, self.url(path, query, None))
            .with_headers(headers)
            .with_body(body);
        request.perform(&self.transport).await
    }

    /// Encode `body`, send it, and decode the reply body into `TOut`.
    ///
    /// Transport errors are returned unchanged. A present body that does not
    /// decode yields `ApiError::Decoding`; an absent body yields
    /// `content: None`.
    pub async fn send<TOut, TIn>(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Vec<Header>,
        query: &[(&str, &str)],
        body: Option<&TIn>,
    ) -> Result<Content<TOut>, ApiError>
    where
        TOut: DeserializeOwned,
        TIn: Serialize + ?Sized,
    {
        let encoded = match body {
            Some(value) => Some(
                self.codec
                    .encoder()
                    .encode(value)
                    .map_err(|e| ApiError::Encoding(e.to_string()))?,
            ),
            None => None,
        };

        let response = self.send_raw(method, path, headers, query, encoded).await?;

        let content = match &response.data {
            Some(data) => Some(
                self.codec
                    .decoder()
                    .decode::<TOut>(data)
                    .map_err(|e| ApiError::Decoding(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Content {
            status_code: response.status_code,
            headers: response.headers,
            content,
        })
    }

    /// JSON accept/content-type headers, plus the bearer token when the
    /// delegate has one.
    fn json_headers(&self) -> Vec<Header> {
        let mut headers = vec![
            Header::Accept(vec![MimeType::Json]),
            Header::ContentType(MimeType::Json),
        ];
        if let Some(token) = self.bearer_token() {
            headers.push(Header::Authorization(token));
        }
        headers
    }

    pub async fn todos(&self) -> Result<Content<Vec<Todo>>, ApiError> {
        self.send::<_, EmptyContent>(HttpMethod::Get, "todos", self.json_headers(), &[], None)
            .await
    }

    pub async fn create_todo(&self, todo: &Todo) -> Result<Content<Todo>, ApiError> {
        self.send(HttpMethod::Post, "todos", self.json_headers(), &[], Some(todo))
            .await
    }

    pub async fn variables(&self) -> Result<Content<Vec<VariableListObject>>, ApiError> {
        self.send::<_, EmptyContent>(HttpMethod::Get, "variables", self.json_headers(), &[], None)
            .await
    }
}

impl<T, C> fmt::Debug for FeatherClient<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatherClient")
            .field("base_url", &self.base_url)
            .field("has_delegate", &self.delegate().is_some())
            .finish_non_exhaustive()
    }
}
