use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::debug;
use upstream_core::{format_size, parse_size, random_letters, CoreError, FormatKind};
use upstream_web::{DelayHeaders, WebResult};

use crate::context::AppContext;

/// Random letters of the requested size, e.g. `/size/1.5K`
///
/// No upper bound is enforced: a large enough size exhausts memory.
pub async fn sized_payload(
    State(ctx): State<AppContext>,
    Path(raw): Path<String>,
    DelayHeaders(directive): DelayHeaders,
) -> WebResult<impl IntoResponse> {
    let size = parse_size(&raw)?;
    let length = usize::try_from(size).map_err(|_| {
        CoreError::invalid_format(FormatKind::Size, raw.as_str(), "larger than addressable memory")
    })?;

    ctx.delay(&directive).await;

    debug!("Generating {} payload", format_size(size));
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        random_letters(length),
    ))
}
