//! Wire-level vocabulary and plain-data HTTP values.
//!
//! # Design
//! `Method`, `MimeType` and `Header` are closed sets that render to the exact
//! strings put on the wire. `Response` and `Content` are what a completed call
//! hands back: the raw reply and its typed counterpart. None of these types
//! perform I/O.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Response header map. Keys keep the case they were received with.
pub type Headers = HashMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl HttpMethod {
    /// Upper-case method token, e.g. `"GET"`.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content kinds the client knows how to talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MimeType {
    Json,
}

impl MimeType {
    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Json => "application/json",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request header. Each variant projects to one `(key, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    ContentDisposition(String),
    Accept(Vec<MimeType>),
    ContentType(MimeType),
    /// Bearer token, rendered as `Bearer <token>`.
    Authorization(String),
    Custom(String, String),
}

impl Header {
    pub fn key(&self) -> &str {
        match self {
            Header::ContentDisposition(_) => "Content-Disposition",
            Header::Accept(_) => "Accept",
            Header::ContentType(_) => "Content-Type",
            Header::Authorization(_) => "Authorization",
            Header::Custom(key, _) => key,
        }
    }

    pub fn value(&self) -> String {
        match self {
            Header::ContentDisposition(disposition) => disposition.clone(),
            Header::Accept(types) => types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Header::ContentType(mime) => mime.as_str().to_string(),
            Header::Authorization(token) => format!("Bearer {token}"),
            Header::Custom(_, value) => value.clone(),
        }
    }

    /// The `(key, value)` pair handed to the transport.
    pub fn to_pair(&self) -> (String, String) {
        (self.key().to_string(), self.value())
    }
}

/// A raw HTTP response, produced once per transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Headers,
    pub data: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: Headers::new(),
            data: None,
        }
    }

    /// The body as UTF-8 text, if there is a body and it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        self.data
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

/// A response whose body was decoded into `T`.
///
/// `content` is `None` when the server sent no body. The status code is never
/// interpreted by the client; branch on it with `is_success` or a `match`.
#[derive(Debug, Clone, PartialEq)]
pub struct Content<T> {
    pub status_code: u16,
    pub headers: Headers,
    pub content: Option<T>,
}

impl<T> Content<T> {
    /// `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Content<U> {
        Content {
            status_code: self.status_code,
            headers: self.headers,
            content: self.content.map(f),
        }
    }
}

/// Input placeholder for calls that carry no request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyContent {}
