#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal search tool for the dashboard dataset.
//!
//! Loads the batch job's JSON output, optionally filters it with the same
//! engine the server uses, and prints category counts or full item
//! listings.

use std::path::PathBuf;

use clap::Parser;
use indicacoes_data::load_dashboard_file;
use indicacoes_data_models::text::{extract_location, format_date_pt_br};
use indicacoes_query::filter_dashboard;

/// Search the indicações dashboard dataset from the terminal.
#[derive(Debug, Parser)]
#[command(name = "indicacoes-cli", version)]
struct Args {
    /// Path to the dashboard dataset file.
    #[arg(long, default_value = "public/dashboard_data.json")]
    data: PathBuf,

    /// Free-text filter applied to numero, descrição, and rua.
    #[arg(long)]
    query: Option<String>,

    /// Print full item listings for this category only.
    #[arg(long)]
    category: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let args = Args::parse();

    log::debug!("Loading dataset from {}", args.data.display());
    let data = load_dashboard_file(&args.data)?;
    let view = filter_dashboard(&data, args.query.as_deref().unwrap_or(""));

    println!("{}", view.metadata.title);
    println!(
        "Processado em: {}",
        format_date_pt_br(&view.metadata.data_processamento)
    );
    println!(
        "{} indicações em {} categorias",
        view.metadata.total_indicacoes, view.metadata.total_categorias
    );
    println!();

    match &args.category {
        Some(category) => match view.details.get(category) {
            Some(category_data) => {
                println!("{category} ({})", category_data.total_indicacoes);
                for item in &category_data.indicacoes {
                    let status = item.status();
                    println!("  {} [{status}]", item.numero);
                    if item.rua.is_empty() {
                        println!("    Local: {}", extract_location(&item.descricao));
                    } else {
                        println!("    Local: {}", item.rua);
                    }
                    if !item.descricao.is_empty() {
                        println!("    {}", item.descricao);
                    }
                    println!("    Documento: {}", item.document_url());
                }
            }
            None => println!("Categoria {category:?} não encontrada"),
        },
        None => {
            for bar in &view.chart_data {
                println!("{:>5}  {}", bar.quantidade, bar.categoria);
            }
        }
    }

    Ok(())
}
