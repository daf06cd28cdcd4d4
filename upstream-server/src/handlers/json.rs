use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use upstream_web::DelayHeaders;

use crate::context::AppContext;

/// Path segment that selects the malformed document
pub const INVALID_KIND: &str = "invalid";

/// Current time as JSON, or as almost-JSON for `/json/invalid`
pub async fn json_time(
    State(ctx): State<AppContext>,
    Path(kind): Path<String>,
    DelayHeaders(directive): DelayHeaders,
) -> impl IntoResponse {
    ctx.delay(&directive).await;

    (
        [(header::CONTENT_TYPE, "application/json")],
        time_document(&kind, Utc::now()),
    )
}

pub fn time_document(kind: &str, now: DateTime<Utc>) -> String {
    if kind == INVALID_KIND {
        // Opening quote of the key is missing on purpose
        format!(r#"{{time": "{}"}}"#, now)
    } else {
        format!(r#"{{"time": "{}"}}"#, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_document_parses() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let body = time_document("valid", now);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["time"], "2024-02-29 12:00:00 UTC");
    }

    #[test]
    fn test_invalid_document_keeps_its_shape() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let body = time_document(INVALID_KIND, now);
        assert_eq!(body, r#"{time": "2024-02-29 12:00:00 UTC"}"#);
        assert!(serde_json::from_str::<serde_json::Value>(&body).is_err());
    }
}
