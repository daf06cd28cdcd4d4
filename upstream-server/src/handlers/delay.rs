use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;
use upstream_core::{parse_duration, DelayDirective};
use upstream_web::WebResult;

use crate::context::AppContext;

/// Sleep for the duration in the path, then answer with an empty 200
pub async fn fixed_delay(
    State(ctx): State<AppContext>,
    Path(raw): Path<String>,
) -> WebResult<StatusCode> {
    let delay = parse_duration(&raw)?;
    debug!("Fixed delay of {:?} requested", delay);

    ctx.delay(&DelayDirective::fixed(delay)).await;
    Ok(StatusCode::OK)
}
