use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pet_triage::error::AppError;
use pet_triage::triage::export::write_catalog_csv;

#[derive(Parser, Debug)]
#[command(
    name = "Pet Triage Assistant",
    about = "Run the pet triage conversation service or explore it from the command line",
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
    /// Print the screening and symptom catalog as CSV
    Catalog(CatalogArgs),
    /// Walk a scripted owner through a full triage conversation
    Demo(DemoArgs),
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

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Species used to pick the additional symptom groups (e.g. "bird", "rabbit")
    #[arg(long)]
    pub(crate) species: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog(args) => run_catalog(args),
        Command::Demo(args) => run_demo(args).await,
    }
}

fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let species = args.species.unwrap_or_default();
    let stdout = std::io::stdout();
    write_catalog_csv(stdout.lock(), &species)?;
    Ok(())
}
