use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use pricelens_core::{parse_site_list, Site};
use pricelens_scraper::{AggregatedResponse, PageFetcher};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub query: Option<String>,
    /// Comma-separated site identifiers; absent or blank selects every site.
    pub sites: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    query: String,
    sites: Vec<Site>,
    results: AggregatedResponse,
}

pub(super) async fn search<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;

    let keyword = query
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "missing search query"))?
        .to_owned();

    let sites = parse_site_list(query.sites.as_deref())
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;
    let limit = normalize_limit(query.limit);

    tracing::info!(keyword = %keyword, ?sites, ?limit, "search request");
    let results = state.aggregator.search(&keyword, &sites, limit).await;

    Ok(Json(ApiResponse {
        data: SearchData {
            query: keyword,
            sites,
            results,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
