//! Delay header extraction
//!
//! Every header is read and parsed before the handler runs, so a malformed
//! `X-Slowdown-From` rejects the request without any sleep.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use upstream_core::{CoreError, DelayDirective, FormatKind};

use crate::errors::WebError;

pub const X_DELAY: &str = "X-Delay";
pub const X_DELAY_PERCENT: &str = "X-Delay-Percent";
pub const X_SLOWDOWN: &str = "X-Slowdown";
pub const X_SLOWDOWN_FROM: &str = "X-Slowdown-From";

/// Delay directive parsed from the `X-Delay*` and `X-Slowdown*` headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelayHeaders(pub DelayDirective);

impl DelayHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, WebError> {
        let delay = header_str(headers, X_DELAY, FormatKind::Duration)?;
        // Percent is lenient: unreadable values fall back to the default
        let percent = headers
            .get(X_DELAY_PERCENT)
            .and_then(|value| value.to_str().ok());
        let slowdown = header_str(headers, X_SLOWDOWN, FormatKind::Duration)?;
        let slowdown_from = header_str(headers, X_SLOWDOWN_FROM, FormatKind::Timestamp)?;

        let directive =
            DelayDirective::from_header_values(delay, percent, slowdown, slowdown_from)?;
        Ok(Self(directive))
    }

    pub fn directive(&self) -> &DelayDirective {
        &self.0
    }

    pub fn into_inner(self) -> DelayDirective {
        self.0
    }
}

/// Header value as text; non-visible-ASCII values are a format error
fn header_str<'a>(
    headers: &'a HeaderMap,
    name: &str,
    kind: FormatKind,
) -> Result<Option<&'a str>, WebError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value.to_str().map(Some).map_err(|_| {
            CoreError::invalid_format(kind, String::from_utf8_lossy(value.as_bytes()), "not text")
                .into()
        }),
    }
}

impl<S> FromRequestParts<S> for DelayHeaders
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
