//! Response body encoders
//!
//! An [`Encoder`] turns any serializable value into bytes for one wire format and
//! advertises the content type that goes with it.

use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

mod json;
mod xml;

pub use json::JsonEncoder;
pub use xml::XmlEncoder;

pub const MIME_JSON: &str = "application/json";
pub const MIME_XML: &str = "application/xml";

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("xml serialization failed: {0}")]
    Xml(#[from] quick_xml::SeError),
    #[error("serialization failed: {0}")]
    Other(String),
}

/// Serializes response data for one wire format.
///
/// Implementations must be stateless with respect to `encode` so a single
/// instance can be shared by every request.
pub trait Encoder: Send + Sync {
    fn encode(&self, data: &dyn erased_serde::Serialize) -> Result<Vec<u8>, EncodeError>;

    /// Value for the `Content-Type` response header.
    fn content_type(&self) -> &str;
}

impl<E: Encoder + ?Sized> Encoder for Arc<E> {
    fn encode(&self, data: &dyn erased_serde::Serialize) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(data)
    }

    fn content_type(&self) -> &str {
        (**self).content_type()
    }
}

/// Built-in formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// Registry key under which the format is matched against `Accept`.
    pub const fn mime(&self) -> &'static str {
        match self {
            Self::Json => MIME_JSON,
            Self::Xml => MIME_XML,
        }
    }

    pub fn encoder(&self, pretty_print: bool) -> Arc<dyn Encoder> {
        match self {
            Self::Json => Arc::new(JsonEncoder::new(pretty_print)),
            Self::Xml => Arc::new(XmlEncoder::new(pretty_print)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Xml => f.write_str("xml"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown format `{0}`, expected json or xml")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "json" | MIME_JSON => Ok(Self::Json),
            "xml" | MIME_XML => Ok(Self::Xml),
            _ => Err(UnknownFormat(value.to_string())),
        }
    }
}
