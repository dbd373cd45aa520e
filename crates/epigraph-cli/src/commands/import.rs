//! CSV import command.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use tracing::info;

use epigraph_core::csv_import;
use epigraph_graph::ingest;

use crate::commands::GraphArgs;

#[derive(Args)]
pub struct ImportArgs {
    /// Kind of entity the CSV file describes
    #[arg(value_enum)]
    pub entity: Entity,

    /// Path to the CSV file
    pub file: PathBuf,
}

#[derive(Copy, Clone, ValueEnum)]
pub enum Entity {
    Cpgs,
    Articles,
    Factors,
    Microbes,
    Diseases,
    MicrobeDiseaseLinks,
}

pub async fn execute(args: ImportArgs, graph: &GraphArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)?;
    let client = graph.connect().await?;

    let count = match args.entity {
        Entity::Cpgs => {
            let records = csv_import::parse_cpgs(&bytes)?;
            ingest::ingest_cpgs(&client, &records).await?;
            records.len()
        }
        Entity::Articles => {
            let records = csv_import::parse_articles(&bytes)?;
            ingest::ingest_articles(&client, &records).await?;
            records.len()
        }
        Entity::Factors => {
            let records = csv_import::parse_factors(&bytes)?;
            ingest::ingest_factors(&client, &records).await?;
            records.len()
        }
        Entity::Microbes => {
            let records = csv_import::parse_microbes(&bytes)?;
            ingest::ingest_microbes(&client, &records).await?;
            records.len()
        }
        Entity::Diseases => {
            let records = csv_import::parse_diseases(&bytes)?;
            ingest::ingest_diseases(&client, &records).await?;
            records.len()
        }
        Entity::MicrobeDiseaseLinks => {
            let records = csv_import::parse_microbe_disease_links(&bytes)?;
            ingest::link_microbes_to_diseases(&client, &records).await?
        }
    };

    info!(count, file = %args.file.display(), "CSV import complete");
    println!(
        "{} imported {} records from {}",
        "✓".green(),
        count.to_string().bold(),
        args.file.display()
    );
    Ok(())
}
