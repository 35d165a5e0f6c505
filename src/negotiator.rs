//! Response content negotiation
//!
//! A [`ContentNegotiator`] keeps a registry of content type keys to encoders. For
//! every response it picks the first key found inside the request's `Accept`
//! value, writes the matching `Content-Type`, and encodes the data.
//!
//! Matching is plain substring containment. Quality values, wildcards and
//! preference order inside `Accept` are not interpreted. When several keys
//! match, the lexicographically smallest key wins.
//!
//! Encoders are registered with `&mut self` and negotiation only needs
//! `&self`, so a negotiator that has been moved into an `Arc` for serving is
//! read-only and needs no locking.

use std::{borrow::Cow, collections::BTreeMap, fmt, sync::Arc};

use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderMap, HeaderName, HeaderValue,
};
use tracing::{debug, error, warn};

use crate::{
    config::NegotiatorConfig,
    encoding::{Encoder, Format, JsonEncoder, XmlEncoder, MIME_JSON, MIME_XML},
    errors::NegotiateError,
};

/// Destination for response headers.
pub trait HeaderSink {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);
}

impl HeaderSink for HeaderMap {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.insert(name, value);
    }
}

/// Chooses an encoding for a response based on the request.
pub trait Negotiator: Send + Sync {
    fn negotiate(
        &self,
        request: &HeaderMap,
        response: &mut dyn HeaderSink,
        data: &dyn erased_serde::Serialize,
    ) -> Result<Vec<u8>, NegotiateError>;
}

/// Returns the request's `Accept` value, or an empty string when it is absent.
///
/// Bytes that are not valid UTF-8 are replaced, so registered keys elsewhere in
/// the value still match.
pub fn accept_preference(request: &HeaderMap) -> Cow<'_, str> {
    request
        .get(ACCEPT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .unwrap_or(Cow::Borrowed(""))
}

#[derive(Clone)]
pub struct ContentNegotiator {
    default_encoder: Arc<dyn Encoder>,
    encoders: BTreeMap<String, Arc<dyn Encoder>>,
}

impl ContentNegotiator {
    /// Creates a negotiator with no registered encoders.
    ///
    /// [`negotiate`](Negotiator::negotiate) fails with
    /// [`NegotiateError::NoEncoders`] until at least one encoder is added.
    pub fn new<E: Encoder + 'static>(default_encoder: E) -> Self {
        Self {
            default_encoder: Arc::new(default_encoder),
            encoders: BTreeMap::new(),
        }
    }

    /// Creates a negotiator with JSON registered under `application/json` and
    /// XML under `application/xml`.
    pub fn with_json_xml<E: Encoder + 'static>(default_encoder: E, pretty_print: bool) -> Self {
        let mut negotiator = Self::new(default_encoder);
        negotiator
            .encoders
            .insert(MIME_JSON.to_string(), Arc::new(JsonEncoder::new(pretty_print)));
        negotiator
            .encoders
            .insert(MIME_XML.to_string(), Arc::new(XmlEncoder::new(pretty_print)));
        negotiator
    }

    pub fn from_config(config: &NegotiatorConfig) -> Self {
        let default_encoder: Arc<dyn Encoder> = config.default_format.encoder(config.pretty_print);
        Self::with_json_xml(default_encoder, config.pretty_print)
    }

    /// Registers `encoder` for requests whose `Accept` value contains
    /// `content_type`, replacing any encoder already registered for it.
    pub fn add_encoder<E: Encoder + 'static>(
        &mut self,
        content_type: impl Into<String>,
        encoder: E,
    ) -> Result<&mut Self, NegotiateError> {
        let content_type = content_type.into();
        if content_type.is_empty() {
            return Err(NegotiateError::InvalidContentType(content_type));
        }

        debug!(
            content_type = %content_type,
            advertised = encoder.content_type(),
            "encoder registered"
        );
        self.encoders.insert(content_type, Arc::new(encoder));
        Ok(self)
    }

    pub fn default_encoder(&self) -> &dyn Encoder {
        &*self.default_encoder
    }

    /// Registered content type keys in matching order.
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    /// Picks the encoder for a preference string, falling back to the default
    /// encoder when no registered key is contained in it.
    pub fn select_encoder(&self, preference: &str) -> &dyn Encoder {
        self.encoders
            .iter()
            .find(|(content_type, _)| preference.contains(content_type.as_str()))
            .map(|(_, encoder)| &**encoder)
            .unwrap_or_else(|| &*self.default_encoder)
    }

    /// Convenience wrapper over [`Negotiator::negotiate`] for sized values.
    pub fn negotiate_value<T: serde::Serialize>(
        &self,
        request: &HeaderMap,
        response: &mut dyn HeaderSink,
        data: &T,
    ) -> Result<Vec<u8>, NegotiateError> {
        self.negotiate(request, response, data)
    }
}

impl Negotiator for ContentNegotiator {
    /// Encodes `data` for the request and sets `Content-Type` on `response`.
    ///
    /// The header is written before encoding and stays in place when encoding
    /// fails, so callers must check the result before sending the response.
    fn negotiate(
        &self,
        request: &HeaderMap,
        response: &mut dyn HeaderSink,
        data: &dyn erased_serde::Serialize,
    ) -> Result<Vec<u8>, NegotiateError> {
        if self.encoders.is_empty() {
            error!("negotiate called on a negotiator without registered encoders");
            return Err(NegotiateError::NoEncoders);
        }

        let preference = accept_preference(request);
        let encoder = self.select_encoder(&preference);
        let content_type = encoder.content_type();
        let header_value = HeaderValue::from_str(content_type)
            .map_err(|_| NegotiateError::InvalidContentType(content_type.to_string()))?;
        response.set_header(CONTENT_TYPE, header_value);

        debug!(accept = %preference, content_type, "response encoding negotiated");

        encoder.encode(data).map_err(|err| {
            warn!(content_type, error = %err, "response encoding failed");
            NegotiateError::from(err)
        })
    }
}

impl fmt::Debug for ContentNegotiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNegotiator")
            .field("default_encoder", &self.default_encoder.content_type())
            .field("encoders", &self.encoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl From<&NegotiatorConfig> for ContentNegotiator {
    fn from(config: &NegotiatorConfig) -> Self {
        Self::from_config(config)
    }
}

impl Default for ContentNegotiator {
    fn default() -> Self {
        Self::with_json_xml(Format::Json.encoder(false), false)
    }
}

/// Returns the encoded bytes, panicking if negotiation failed.
///
/// For call sites that treat an encoding failure as unrecoverable.
pub fn must<E: fmt::Display>(result: Result<Vec<u8>, E>) -> Vec<u8> {
    match result {
        Ok(bytes) => bytes,
        Err(err) => panic!("response encoding failed: {err}"),
    }
}
