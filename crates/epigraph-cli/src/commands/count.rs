//! Vertex count command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use epigraph_graph::queries::count_vertices;

use crate::commands::GraphArgs;

#[derive(Args)]
pub struct CountArgs {
    /// Vertex label to count (cpg, factor, microbe, disease, article)
    pub label: String,
}

pub async fn execute(args: CountArgs, graph: &GraphArgs) -> Result<()> {
    let client = graph.connect().await?;
    let count = count_vertices(&client, &args.label).await?;
    println!("{}: {}", args.label.cyan(), count.to_string().bold());
    Ok(())
}
