use crate::demo::{
    run_demo, run_grade, run_minimum_final, run_year_end, DemoArgs, GradeArgs, MinimumFinalArgs,
    YearEndArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gradecalc::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Grade Calculator",
    about = "Compute course scores and the minimum final-exam score needed to pass",
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
    /// Minimum final-exam score needed to reach the passing grade
    MinimumFinal(MinimumFinalArgs),
    /// Course score once every component, the final included, is graded
    YearEnd(YearEndArgs),
    /// Letter grade for a course score
    Grade(GradeArgs),
    /// Run an end-to-end CLI demo of both calculators and the grade sheet
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
        Command::MinimumFinal(args) => run_minimum_final(args),
        Command::YearEnd(args) => run_year_end(args),
        Command::Grade(args) => run_grade(args),
        Command::Demo(args) => run_demo(args),
    }
}
