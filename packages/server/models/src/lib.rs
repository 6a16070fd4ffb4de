#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the indicações dashboard server.
//!
//! The dashboard endpoint wraps the dataset in an `_apiMeta` envelope so
//! the frontend can track response freshness independently of the file
//! mtime carried inside the dataset itself.

use indicacoes_data_models::DashboardData;
use serde::{Deserialize, Serialize};

/// Per-response freshness metadata attached by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// When the server produced this response, in milliseconds since the
    /// Unix epoch.
    pub fetched_at: i64,
    /// Opaque version token; changes on every response.
    pub version: String,
}

impl ApiMeta {
    /// Builds an envelope stamped with `fetched_at`, using the timestamp
    /// itself as the version token.
    #[must_use]
    pub fn stamped(fetched_at: i64) -> Self {
        Self {
            fetched_at,
            version: fetched_at.to_string(),
        }
    }
}

/// The dashboard dataset wrapped with response metadata.
///
/// Serializes as the dataset's own fields plus an `_apiMeta` key, matching
/// what the frontend refresh hook expects.
#[derive(Debug, Serialize)]
pub struct DashboardEnvelope<'a> {
    /// The (possibly filtered) dataset.
    #[serde(flatten)]
    pub data: &'a DashboardData,
    /// Response freshness metadata.
    #[serde(rename = "_apiMeta")]
    pub api_meta: ApiMeta,
}

/// Query parameters accepted by the dashboard data endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardQueryParams {
    /// Free-text search applied by the filter engine. Empty or absent
    /// returns the full dataset.
    pub q: Option<String>,
    /// Client cache-busting timestamp; accepted and ignored.
    pub t: Option<i64>,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Human-readable error description.
    pub error: String,
}
