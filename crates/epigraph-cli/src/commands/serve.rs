//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::commands::GraphArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "EPIGRAPH_PORT", default_value = "8000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "EPIGRAPH_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

pub async fn execute(args: ServeArgs, graph: &GraphArgs) -> Result<()> {
    let client = graph.connect().await?;

    println!();
    println!("  {} {}", "Epigraph".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}  http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}  {}", "Graph".green(), graph.uri);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    epigraph_web::run_server(client, &args.host, args.port).await?;

    Ok(())
}
