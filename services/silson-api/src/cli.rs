use crate::render::{run_import, run_quote, run_template, ImportArgs, QuoteArgs, TemplateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use silson_core::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Silson Reimbursement Calculator",
    about = "Compare indemnity health insurance payouts across product generations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Quote a single receipt against every generation
    Quote(QuoteArgs),
    /// Evaluate a receipt sheet and print the per-row table and comparison
    Import(ImportArgs),
    /// Write a blank input sheet with example receipts
    Template(TemplateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Import(args) => run_import(args),
        Command::Template(args) => run_template(args),
    }
}
