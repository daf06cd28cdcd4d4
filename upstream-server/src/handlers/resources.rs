use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;
use upstream_core::{index_page, resolve_limit, CoreError, FormatKind};
use upstream_web::{DelayHeaders, LimitQuery, WebResult};

use crate::context::AppContext;

/// First `limit` resources keyed by their position in the page
pub async fn list_resources(
    State(ctx): State<AppContext>,
    DelayHeaders(directive): DelayHeaders,
    query: LimitQuery,
) -> Response {
    ctx.delay(&directive).await;

    let limit = resolve_limit(query.limit, ctx.default_limit);
    let page = ctx.store.list(limit);
    debug!("Listing {} of {} resources", page.len(), ctx.store.len());

    Json(index_page(page)).into_response()
}

pub async fn show_resource(
    State(ctx): State<AppContext>,
    Path(raw): Path<String>,
    DelayHeaders(directive): DelayHeaders,
) -> WebResult<Response> {
    let id: i64 = raw
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            CoreError::invalid_format(FormatKind::Id, raw.as_str(), e.to_string())
        })?;

    ctx.delay(&directive).await;

    let resource = ctx.store.get(id)?;
    Ok(Json(resource).into_response())
}
