//! Typed client core for feather JSON APIs.
//!
//! # Overview
//! Callers issue REST calls through `FeatherClient` and get back a
//! `Content<T>`: the status code, the response headers and an optionally
//! decoded body. The pipeline is
//!
//! `FeatherClient::send` -> encode body -> `HttpRequest::perform` ->
//! `Transport` -> normalize reply -> decode body.
//!
//! # Design
//! - The network primitive sits behind the `Transport` trait. `UreqTransport`
//!   is the default; tests swap in scripted transports.
//! - Body formats sit behind the `Codec` trait, which hands out a fresh
//!   encoder and decoder per call. `JsonCodec` is the default.
//! - Status codes are never turned into errors. `ApiError` covers transport
//!   and codec failures only.
//! - A malformed base URL is a programming error and panics.
//! - The auth-token delegate is held weakly and may disappear at any time.

pub mod client;
pub mod codec;
pub mod delegate;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;
pub mod url;

pub use crate::client::FeatherClient;
pub use crate::codec::{BodyDecoder, BodyEncoder, Codec, JsonCodec};
pub use crate::delegate::{ClientDelegate, TokenStore};
pub use crate::error::{ApiError, TransportError};
pub use crate::http::{Content, EmptyContent, Header, Headers, HttpMethod, HttpResponse, MimeType};
pub use crate::request::HttpRequest;
pub use crate::transport::{RawReply, Transport, TransportCall, UreqTransport};
pub use crate::types::{Todo, VariableListObject};
pub use crate::url::build_url;
