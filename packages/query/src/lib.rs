#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Search/filter engine over the dashboard dataset.
//!
//! Given a case-insensitive substring query, produces a fresh dataset with
//! non-matching indicações removed, empty categories dropped, and all
//! aggregates (per-category counts, chart bars, metadata totals) recomputed
//! from the survivors. The inputs are never mutated.
//!
//! Output ordering follows the `details` map's key insertion order for both
//! the surviving categories and the rebuilt `chart_data`. Categories present
//! in `details` but absent from the original `chart_data` (or vice versa)
//! are not reconciled; a missing chart entry yields an empty `sheet_name`.

pub mod cache;

use indexmap::IndexMap;
use indicacoes_data_models::{CategoryData, ChartDataItem, DashboardData, Indicacao, Metadata};

pub use cache::FilterCache;

/// Filters `data` down to indicações matching `query`.
///
/// An empty or whitespace-only query is a no-op and returns a structural
/// clone of the input with the same category set and ordering. Matching is
/// a case-insensitive substring test against each item's `numero`,
/// `descricao`, and `rua`; a match in any one field keeps the item. Missing
/// fields behave as empty strings and never match a non-empty query.
#[must_use]
pub fn filter_dashboard(data: &DashboardData, query: &str) -> DashboardData {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return data.clone();
    }
    let needle = trimmed.to_lowercase();

    let mut details: IndexMap<String, CategoryData> = IndexMap::new();
    for (categoria, category) in &data.details {
        let surviving: Vec<Indicacao> = category
            .indicacoes
            .iter()
            .filter(|item| matches_query(item, &needle))
            .cloned()
            .collect();

        if !surviving.is_empty() {
            details.insert(
                categoria.clone(),
                CategoryData {
                    sheet_name: category.sheet_name.clone(),
                    total_indicacoes: surviving.len() as u64,
                    indicacoes: surviving,
                },
            );
        }
    }

    let chart_data: Vec<ChartDataItem> = details
        .iter()
        .map(|(categoria, category)| ChartDataItem {
            categoria: categoria.clone(),
            quantidade: category.total_indicacoes,
            // Sheet name comes from the original unfiltered chart data.
            sheet_name: data
                .chart_data
                .iter()
                .find(|item| &item.categoria == categoria)
                .map(|item| item.sheet_name.clone())
                .unwrap_or_default(),
        })
        .collect();

    let total_indicacoes = details.values().map(|c| c.total_indicacoes).sum();

    DashboardData {
        metadata: Metadata {
            title: data.metadata.title.clone(),
            total_categorias: details.len() as u64,
            total_indicacoes,
            data_processamento: data.metadata.data_processamento.clone(),
        },
        chart_data,
        details,
        meta: data.meta,
    }
}

fn matches_query(item: &Indicacao, needle: &str) -> bool {
    item.numero.to_lowercase().contains(needle)
        || item.descricao.to_lowercase().contains(needle)
        || item.rua.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DashboardData {
        serde_json::from_str(
            r#"{
            "metadata": {
                "title": "Dashboard de Indicações",
                "total_categorias": 2,
                "total_indicacoes": 3,
                "data_processamento": "2024-06-01"
            },
            "chart_data": [
                {"categoria":"Iluminação","quantidade":1,"sheet_name":"ILUM"},
                {"categoria":"Asfalto","quantidade":2,"sheet_name":"ASF"}
            ],
            "details": {
                "Iluminação": {
                    "sheet_name":"ILUM",
                    "total_indicacoes":1,
                    "indicacoes":[{"numero":"12/2024","descricao":"poste quebrado","rua":"Rua A"}]
                },
                "Asfalto": {
                    "sheet_name":"ASF",
                    "total_indicacoes":2,
                    "indicacoes":[
                        {"numero":"5/2023","descricao":"buraco","rua":"Rua B"},
                        {"numero":"6/2023","descricao":"recapeamento","rua":"Avenida Poste"}
                    ]
                }
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_query_returns_unchanged_clone() {
        let data = sample();
        let result = filter_dashboard(&data, "");
        assert_eq!(result, data);

        let whitespace = filter_dashboard(&data, "   ");
        assert_eq!(whitespace, data);
    }

    #[test]
    fn single_match_keeps_only_its_category() {
        let data: DashboardData = serde_json::from_str(
            r#"{
            "metadata": {"title":"t","total_categorias":2,"total_indicacoes":2,"data_processamento":""},
            "chart_data": [
                {"categoria":"Iluminação","quantidade":1,"sheet_name":"ILUM"},
                {"categoria":"Asfalto","quantidade":1,"sheet_name":"ASF"}
            ],
            "details": {
                "Iluminação": {
                    "sheet_name":"ILUM",
                    "total_indicacoes":1,
                    "indicacoes":[{"numero":"12/2024","descricao":"poste quebrado","rua":"Rua A"}]
                },
                "Asfalto": {
                    "sheet_name":"ASF",
                    "total_indicacoes":1,
                    "indicacoes":[{"numero":"5/2023","descricao":"buraco","rua":"Rua B"}]
                }
            }
        }"#,
        )
        .unwrap();
        let result = filter_dashboard(&data, "poste");
        let keys: Vec<&str> = result.details.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Iluminação"]);
        assert_eq!(result.details["Iluminação"].indicacoes.len(), 1);
        assert_eq!(result.metadata.total_indicacoes, 1);
        assert_eq!(result.metadata.total_categorias, 1);
    }

    #[test]
    fn query_matches_description() {
        let data = sample();
        let result = filter_dashboard(&data, "buraco");
        assert_eq!(result.metadata.total_indicacoes, 1);
        assert_eq!(result.metadata.total_categorias, 1);
        let keys: Vec<&str> = result.details.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Asfalto"]);
    }

    #[test]
    fn query_matches_numero_and_rua_too() {
        let data = sample();

        let by_numero = filter_dashboard(&data, "12/2024");
        assert_eq!(by_numero.metadata.total_indicacoes, 1);
        assert!(by_numero.details.contains_key("Iluminação"));

        let by_rua = filter_dashboard(&data, "rua b");
        assert_eq!(by_rua.metadata.total_indicacoes, 1);
        assert!(by_rua.details.contains_key("Asfalto"));
    }

    #[test]
    fn matching_is_case_insensitive_across_categories() {
        let data = sample();
        // "poste" appears in Iluminação's description and Asfalto's rua.
        let result = filter_dashboard(&data, "POSTE");
        assert_eq!(result.metadata.total_categorias, 2);
        assert_eq!(result.metadata.total_indicacoes, 2);
    }

    #[test]
    fn empty_categories_are_dropped_from_details_and_chart() {
        let data = sample();
        let result = filter_dashboard(&data, "quebrado");
        assert!(!result.details.contains_key("Asfalto"));
        assert!(result.chart_data.iter().all(|c| c.categoria != "Asfalto"));
        assert_eq!(result.chart_data.len(), 1);
    }

    #[test]
    fn counts_are_recomputed_for_surviving_categories() {
        let data = sample();
        let result = filter_dashboard(&data, "2023");
        let asfalto = &result.details["Asfalto"];
        assert_eq!(asfalto.total_indicacoes, 2);
        assert_eq!(asfalto.total_indicacoes as usize, asfalto.indicacoes.len());
        assert_eq!(result.metadata.total_indicacoes, 2);
    }

    #[test]
    fn chart_data_follows_details_order_with_original_sheet_names() {
        let data = sample();
        let result = filter_dashboard(&data, "poste");
        let bars: Vec<(&str, u64, &str)> = result
            .chart_data
            .iter()
            .map(|c| (c.categoria.as_str(), c.quantidade, c.sheet_name.as_str()))
            .collect();
        assert_eq!(bars, vec![("Iluminação", 1, "ILUM"), ("Asfalto", 1, "ASF")]);
    }

    #[test]
    fn missing_original_chart_entry_yields_empty_sheet_name() {
        let mut data = sample();
        data.chart_data.retain(|c| c.categoria != "Asfalto");
        let result = filter_dashboard(&data, "buraco");
        assert_eq!(result.chart_data.len(), 1);
        assert_eq!(result.chart_data[0].categoria, "Asfalto");
        assert_eq!(result.chart_data[0].sheet_name, "");
    }

    #[test]
    fn every_survivor_matches_in_some_field() {
        let data = sample();
        let needle = "rua";
        let result = filter_dashboard(&data, needle);
        for category in result.details.values() {
            for item in &category.indicacoes {
                let hit = item.numero.to_lowercase().contains(needle)
                    || item.descricao.to_lowercase().contains(needle)
                    || item.rua.to_lowercase().contains(needle);
                assert!(hit, "{} survived without matching", item.numero);
            }
        }
    }

    #[test]
    fn no_match_yields_empty_dataset() {
        let data = sample();
        let result = filter_dashboard(&data, "inexistente");
        assert!(result.details.is_empty());
        assert!(result.chart_data.is_empty());
        assert_eq!(result.metadata.total_indicacoes, 0);
        assert_eq!(result.metadata.total_categorias, 0);
    }

    #[test]
    fn items_with_missing_fields_do_not_break_filtering() {
        let data: DashboardData = serde_json::from_str(
            r#"{
            "metadata": {"title":"t","total_categorias":1,"total_indicacoes":2,"data_processamento":""},
            "chart_data": [{"categoria":"Diversos","quantidade":2,"sheet_name":"DIV"}],
            "details": {
                "Diversos": {
                    "sheet_name":"DIV",
                    "total_indicacoes":2,
                    "indicacoes":[{}, {"descricao":"calçada danificada"}]
                },
                "Vazia": {"sheet_name":"VZ","total_indicacoes":0,"indicacoes":null}
            }
        }"#,
        )
        .unwrap();
        let result = filter_dashboard(&data, "calçada");
        assert_eq!(result.metadata.total_indicacoes, 1);
        assert_eq!(result.details["Diversos"].indicacoes.len(), 1);
    }

    #[test]
    fn inputs_are_never_mutated() {
        let data = sample();
        let before = data.clone();
        let _ = filter_dashboard(&data, "buraco");
        assert_eq!(data, before);
    }
}
