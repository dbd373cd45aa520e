//! Vertex inspection command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use epigraph_graph::queries::vertex_details;

use crate::commands::GraphArgs;

#[derive(Args)]
pub struct InspectArgs {
    /// Vertex label (cpg, factor, microbe, disease, article)
    pub label: String,

    /// Property key to match on
    pub key: String,

    /// Property value to match on
    pub value: String,
}

pub async fn execute(args: InspectArgs, graph: &GraphArgs) -> Result<()> {
    let client = graph.connect().await?;
    let details = vertex_details(&client, &args.label, &args.key, &args.value).await?;

    if details.is_empty() {
        println!("{}", "No matching vertices.".dimmed());
        return Ok(());
    }

    for detail in &details {
        println!("{}", args.label.cyan().bold());
        for (key, value) in &detail.properties {
            println!("  {}: {}", key.bold(), value);
        }
        if !detail.connected.is_empty() {
            println!("  {}", "connected:".dimmed());
            for neighbor in &detail.connected {
                let name = neighbor
                    .get("name")
                    .or_else(|| neighbor.values().next())
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                println!("    - {}", name);
            }
        }
        println!();
    }
    Ok(())
}
