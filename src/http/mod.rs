//! axum integration
//!
//! Handlers take a [`Negotiation`] extractor and answer with
//! [`Negotiation::respond`], which encodes the handler's data in the format the
//! client asked for.

pub mod extract;

pub use extract::Negotiation;
