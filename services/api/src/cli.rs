use crate::demo::{run_demand, run_demo, run_recommend, DemandArgs, DemoArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholar_fit::config::AppConfig;
use scholar_fit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Fit",
    about = "Score, explain, and rank scholarship fit from the command line",
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
    /// Rank scholarships for a student on the demo roster
    Recommend(RecommendArgs),
    /// Show how often each dimension is a declared priority across the corpus
    Demand(DemandArgs),
    /// Walk through scoring, explanation, ranking, and demand for a demo student
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args, AppConfig::load()?),
        Command::Demand(args) => run_demand(args, AppConfig::load()?),
        Command::Demo(args) => run_demo(args),
    }
}
