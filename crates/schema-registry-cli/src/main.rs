//! Schema Registry CLI
//!
//! Operator tooling over the schema lifecycle engine, wired directly to an
//! in-memory engine instance rather than a network transport. There is no
//! backing store in this workspace (that layer is explicitly out of scope),
//! so `demo` is the command that shows the full write/read lifecycle in one
//! sitting; `schema` and `serdes` expose single-shot operations useful on
//! their own (validating a schema, checking two texts for compatibility,
//! round-tripping a file through the in-memory file store).

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{schema, serdes};
use error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "schema-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Schema Registry CLI - operator tooling over the in-memory lifecycle engine")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schema management commands
    #[command(subcommand)]
    Schema(schema::SchemaCommand),

    /// SerDes binding commands
    #[command(subcommand)]
    Serdes(serdes::SerDesCommand),

    /// Run the full register/evolve/reject/search/bind lifecycle once, end to end
    Demo,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error::print_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Schema(cmd) => schema::execute(cmd, cli.output).await,
        Commands::Serdes(cmd) => serdes::execute(cmd, cli.output).await,
        Commands::Demo => commands::demo::run().await,
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();
}
