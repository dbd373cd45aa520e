//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use epigraph_graph::{GraphClient, GraphConfig};

pub mod count;
pub mod import;
pub mod inspect;
pub mod schema;
pub mod serve;

/// Epigraph - CpG methylation association graph backend
#[derive(Parser)]
#[command(name = "epigraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Graph store connection settings, shared by all commands.
#[derive(Args)]
pub struct GraphArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, env = "EPIGRAPH_NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub uri: String,

    /// Neo4j user
    #[arg(long, env = "EPIGRAPH_NEO4J_USER", default_value = "neo4j")]
    pub user: String,

    /// Neo4j password
    #[arg(long, env = "EPIGRAPH_NEO4J_PASSWORD", default_value = "epigraph_dev")]
    pub password: String,

    /// Neo4j database name
    #[arg(long, env = "EPIGRAPH_NEO4J_DATABASE", default_value = "neo4j")]
    pub database: String,
}

impl GraphArgs {
    pub async fn connect(&self) -> Result<GraphClient> {
        let config = GraphConfig {
            uri: self.uri.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        };
        Ok(GraphClient::connect(&config).await?)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// Create the graph lookup indexes
    Schema,

    /// Import a CSV file into the graph
    Import(import::ImportArgs),

    /// Count vertices by label
    Count(count::CountArgs),

    /// Show a vertex's properties and connected neighbors
    Inspect(inspect::InspectArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, &self.graph).await,
            Commands::Schema => schema::execute(&self.graph).await,
            Commands::Import(args) => import::execute(args, &self.graph).await,
            Commands::Count(args) => count::execute(args, &self.graph).await,
            Commands::Inspect(args) => inspect::execute(args, &self.graph).await,
        }
    }
}
