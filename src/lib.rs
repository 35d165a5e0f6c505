//! Format-agnostic HTTP responses.
//!
//! Handlers produce a serializable value and a [`ContentNegotiator`] decides,
//! per request, whether it goes out as JSON, XML, or any registered format.

pub mod config;
pub mod encoding;
pub mod errors;
pub mod http;
pub mod logging;
pub mod negotiator;

pub use config::NegotiatorConfig;
pub use encoding::{EncodeError, Encoder, Format, JsonEncoder, XmlEncoder, MIME_JSON, MIME_XML};
pub use errors::NegotiateError;
pub use http::Negotiation;
pub use negotiator::{accept_preference, must, ContentNegotiator, HeaderSink, Negotiator};
