use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, Uri},
};

/// `limit` query parameter, parsed leniently
///
/// The first `limit` wins. Anything that is not a non-negative integer reads
/// as absent so the store falls back to its default page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}

impl LimitQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(uri) {
            Ok(Query(pairs)) => pairs,
            Err(e) => {
                tracing::debug!("Ignoring unreadable query string: {}", e);
                Vec::new()
            }
        };

        let limit = pairs
            .into_iter()
            .find(|(key, _)| key == "limit")
            .and_then(|(_, value)| value.trim().parse().ok());

        Self { limit }
    }
}

impl<S> FromRequestParts<S> for LimitQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_of(uri: &'static str) -> Option<u64> {
        LimitQuery::from_uri(&Uri::from_static(uri)).limit
    }

    #[test]
    fn test_numeric_limit() {
        assert_eq!(limit_of("/resource?limit=3"), Some(3));
        assert_eq!(limit_of("/resource?limit=0"), Some(0));
    }

    #[test]
    fn test_first_repeated_limit_wins() {
        assert_eq!(limit_of("/resource?limit=3&limit=4"), Some(3));
        assert_eq!(limit_of("/resource?page=2&limit=5&limit=x"), Some(5));
    }

    #[test]
    fn test_missing_or_garbage_limit_is_absent() {
        assert_eq!(limit_of("/resource"), None);
        assert_eq!(limit_of("/resource?limit="), None);
        assert_eq!(limit_of("/resource?limit=ten"), None);
        assert_eq!(limit_of("/resource?limit=-4"), None);
        assert_eq!(limit_of("/resource?limit=%FF"), None);
        assert_eq!(limit_of("/resource?page=2"), None);
    }
}
