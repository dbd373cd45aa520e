//! Schema initialization command.

use anyhow::Result;
use colored::Colorize;

use crate::commands::GraphArgs;

pub async fn execute(graph: &GraphArgs) -> Result<()> {
    let client = graph.connect().await?;
    epigraph_graph::schema::initialize_schema(&client).await?;
    println!("{} lookup indexes created", "✓".green());
    Ok(())
}
