//! HTTP handler functions for the dashboard API.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use indicacoes_data_models::DashboardData;
use indicacoes_server_models::{
    ApiError, ApiHealth, ApiMeta, DashboardEnvelope, DashboardQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dashboard-data`
///
/// Returns the current dataset wrapped in an `_apiMeta` envelope, filtered
/// by `q` when present, with cache-defeating headers so clients always see
/// the batch job's latest output.
pub async fn dashboard_data(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let Some(view) = current_view(&state, &params) else {
        return load_failure();
    };

    let fetched_at = Utc::now().timestamp_millis();
    log::debug!("Returning dashboard data, fetched at {fetched_at}");

    let mut response = HttpResponse::Ok();
    no_store_headers(&mut response);
    response
        .insert_header(("Surrogate-Control", "no-store"))
        .insert_header(("X-Accel-Expires", "0"))
        .insert_header(("X-Data-Fresh", "true"))
        .json(DashboardEnvelope {
            data: view.as_ref(),
            api_meta: ApiMeta::stamped(fetched_at),
        })
}

/// `GET /api/data`
///
/// Returns the current dataset without the `_apiMeta` envelope, filtered by
/// `q` when present.
pub async fn data(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let Some(view) = current_view(&state, &params) else {
        return load_failure();
    };

    let mut response = HttpResponse::Ok();
    no_store_headers(&mut response);
    response.json(&*view)
}

/// Re-reads the dataset file, falls back to the last good copy on failure,
/// and applies the filter engine. `None` means no dataset has ever loaded.
fn current_view(
    state: &web::Data<AppState>,
    params: &DashboardQueryParams,
) -> Option<Arc<DashboardData>> {
    if let Err(e) = state.store.reload() {
        log::warn!("Dataset re-read failed, serving last good copy: {e}");
    }
    let (generation, data) = state.store.snapshot()?;
    let query = params.q.as_deref().unwrap_or("");
    Some(state.cache.get_or_compute(generation, &data, query))
}

fn load_failure() -> HttpResponse {
    log::error!("No dashboard dataset available");
    HttpResponse::InternalServerError().json(ApiError {
        error: "Failed to load dashboard data".to_string(),
    })
}

fn no_store_headers(response: &mut actix_web::HttpResponseBuilder) {
    response
        .insert_header((
            "Cache-Control",
            "no-cache, no-store, must-revalidate, max-age=0",
        ))
        .insert_header(("Pragma", "no-cache"))
        .insert_header(("Expires", "0"));
}
