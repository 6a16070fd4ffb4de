#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset types for the indicações dashboard.
//!
//! These types mirror the JSON document produced by the external batch job
//! (`dashboard_data.json`). Field names are kept in Portuguese to match the
//! wire format. The `details` map preserves JSON object key insertion order
//! because the filter engine's output ordering follows it.

pub mod status;
pub mod text;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub use status::IndicationStatus;

/// Fallback link for indicações without a direct document URL, pointing at
/// the SAPL legislative-document system's landing page.
pub const SAPL_FALLBACK_URL: &str = "https://sapl.camarabento.rs.gov.br/";

/// A single citizen request record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicacao {
    /// Identifier in the form `<seq>/<year>`, e.g. `"12/2024"`.
    #[serde(default)]
    pub numero: String,
    /// Free-text description of the request.
    #[serde(default)]
    pub descricao: String,
    /// Street or location string.
    #[serde(default)]
    pub rua: String,
    /// Direct link to the request's PDF document, when the batch job
    /// resolved one.
    #[serde(rename = "pdfUrl", default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

impl Indicacao {
    /// Returns the outbound document link: the direct PDF URL when present,
    /// otherwise [`SAPL_FALLBACK_URL`].
    #[must_use]
    pub fn document_url(&self) -> &str {
        self.pdf_url.as_deref().unwrap_or(SAPL_FALLBACK_URL)
    }

    /// Returns the display status derived from the identifier's year suffix.
    #[must_use]
    pub fn status(&self) -> IndicationStatus {
        IndicationStatus::from_numero(&self.numero)
    }
}

/// All indicações bucketed under one category, as stored in `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData {
    /// Display name of the source spreadsheet sheet.
    #[serde(default)]
    pub sheet_name: String,
    /// Number of indicações in this category. Matches `indicacoes.len()` in
    /// well-formed data; the filter engine re-establishes this after
    /// filtering.
    #[serde(default)]
    pub total_indicacoes: u64,
    /// The records themselves. A `null` or absent list means zero items.
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub indicacoes: Vec<Indicacao>,
}

/// One bar of the category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataItem {
    /// Category name, keying into `details`.
    #[serde(default)]
    pub categoria: String,
    /// Aggregate count for the category.
    #[serde(default)]
    pub quantidade: u64,
    /// Source sheet display name.
    #[serde(default)]
    pub sheet_name: String,
}

/// Dataset-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Dashboard title.
    #[serde(default)]
    pub title: String,
    /// Number of categories. Matches `chart_data.len()` in unfiltered data.
    #[serde(default)]
    pub total_categorias: u64,
    /// Total number of indicações across all categories.
    #[serde(default)]
    pub total_indicacoes: u64,
    /// When the batch job processed the source spreadsheets (date string).
    #[serde(default)]
    pub data_processamento: String,
}

/// Freshness metadata attached by the loader, not present in the file
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// File modification time in milliseconds since the Unix epoch.
    pub last_modified: i64,
    /// When the loader read the file, in milliseconds since the Unix epoch.
    pub loaded_at: i64,
}

/// The root dashboard dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Dataset-level metadata.
    pub metadata: Metadata,
    /// Ordered per-category aggregate counts for the bar chart.
    #[serde(default)]
    pub chart_data: Vec<ChartDataItem>,
    /// Full record lists keyed by category name, in insertion order.
    #[serde(default)]
    pub details: IndexMap<String, CategoryData>,
    /// Loader-attached freshness metadata.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FileMeta>,
}

fn null_as_empty_vec<'de, D>(deserializer: D) -> Result<Vec<Indicacao>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Indicacao>>::deserialize(deserializer)?.unwrap_or_default())
}
