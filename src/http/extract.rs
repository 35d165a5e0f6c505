use std::{convert::Infallible, sync::Arc};

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    errors::AppError,
    negotiator::{ContentNegotiator, Negotiator},
};

/// Request-scoped handle pairing the shared negotiator with the request headers.
#[derive(Debug, Clone)]
pub struct Negotiation {
    negotiator: Arc<ContentNegotiator>,
    headers: HeaderMap,
}

impl Negotiation {
    pub fn new(negotiator: Arc<ContentNegotiator>, headers: HeaderMap) -> Self {
        Self {
            negotiator,
            headers,
        }
    }

    pub fn respond<T: Serialize>(self, data: &T) -> Response {
        self.respond_with_status(StatusCode::OK, data)
    }

    pub fn respond_with_status<T: Serialize>(self, status: StatusCode, data: &T) -> Response {
        let mut response = Response::new(Body::empty());
        match self
            .negotiator
            .negotiate(&self.headers, response.headers_mut(), data)
        {
            Ok(body) => {
                *response.status_mut() = status;
                *response.body_mut() = Body::from(body);
                response
            }
            Err(err) => AppError::from(err).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for Negotiation
where
    Arc<ContentNegotiator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(
            Arc::<ContentNegotiator>::from_ref(state),
            parts.headers.clone(),
        ))
    }
}
