//! The network primitive the client is built on.
//!
//! # Design
//! A `Transport` takes a fully rendered `TransportCall` and produces a
//! `RawReply` or a `TransportError`. It is deliberately dumb: it does not
//! parse bodies, interpret status codes or retry. Header keys and values come
//! back as bytes so the request layer decides what counts as text.
//!
//! `UreqTransport` is the default implementation. ureq is blocking, so each
//! call runs on tokio's blocking pool and the returned future never blocks the
//! caller's thread.

use std::fmt;
use std::future::Future;

use url::Url;

use crate::error::TransportError;
use crate::http::HttpMethod;

/// A request rendered for the transport. Headers are in caller order and
/// are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportCall {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Whatever came back over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReply {
    /// `None` when the reply carried no HTTP status.
    pub status: Option<u16>,
    pub headers: Vec<(Vec<u8>, Vec<u8>)>,
    pub body: Option<Vec<u8>>,
}

/// Performs one HTTP exchange. Implementations complete exactly once per call.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        call: TransportCall,
    ) -> impl Future<Output = Result<RawReply, TransportError>> + Send;
}

/// Blocking ureq agent driven from tokio's blocking pool.
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are data for the caller, never transport errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a preconfigured agent. It should keep `http_status_as_error`
    /// disabled, otherwise 4xx/5xx replies surface as `ApiError::Unknown`.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(
        &self,
        call: TransportCall,
    ) -> impl Future<Output = Result<RawReply, TransportError>> + Send {
        let agent = self.agent.clone();
        async move {
            tokio::task::spawn_blocking(move || execute_blocking(&agent, call))
                .await
                .map_err(|e| -> TransportError { Box::new(e) })?
        }
    }
}

fn execute_blocking(agent: &ureq::Agent, call: TransportCall) -> Result<RawReply, TransportError> {
    let mut builder = ::http::Request::builder()
        .method(call.method.as_str())
        .uri(call.url.as_str());
    for (key, value) in &call.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    let mut response = match call.body {
        Some(bytes) => agent.run(builder.body(bytes.as_slice())?)?,
        None => agent.run(builder.body(())?)?,
    };

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| (name.as_str().as_bytes().to_vec(), value.as_bytes().to_vec()))
        .collect();
    let body = response.body_mut().read_to_vec()?;

    Ok(RawReply {
        status: Some(status),
        headers,
        body: Some(body),
    })
}
