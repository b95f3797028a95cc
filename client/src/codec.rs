//! Body encoders and decoders.
//!
//! # Design
//! A `Codec` is a factory pair. The client asks it for a fresh encoder or
//! decoder on every call, so concurrent calls never share codec state and a
//! codec only needs `&self` access to build one.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait BodyEncoder {
    type Error: Display;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, Self::Error>;
}

pub trait BodyDecoder {
    type Error: Display;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error>;
}

/// Builds the encoder and decoder used for one call.
pub trait Codec: Send + Sync {
    type Encoder: BodyEncoder;
    type Decoder: BodyDecoder;

    fn encoder(&self) -> Self::Encoder;
    fn decoder(&self) -> Self::Decoder;
}

/// JSON bodies via serde_json.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec {
    /// Pretty-print encoded bodies.
    pub pretty: bool,
}

impl JsonCodec {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    type Encoder = JsonEncoder;
    type Decoder = JsonDecoder;

    fn encoder(&self) -> JsonEncoder {
        JsonEncoder {
            pretty: self.pretty,
        }
    }

    fn decoder(&self) -> JsonDecoder {
        JsonDecoder
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    pretty: bool,
}

impl BodyEncoder for JsonEncoder {
    type Error = serde_json::Error;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
