use crate::demo::{
    run_demo, run_evaluation, run_health_check, run_pay_rules, run_roi, DemoArgs,
    EvaluationArgs, HealthCheckArgs, PayRulesArgs, RoiArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use reform_diagnostic::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Business Reform Diagnostic",
    about = "Run the business reform diagnostic service or its simulators from the command line",
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
    /// Score a set of health-check answers
    HealthCheck(HealthCheckArgs),
    /// Show what a number of challenges is worth under the incentive model
    Evaluation(EvaluationArgs),
    /// Compare the two fixed employees under one or both pay rules
    PayRules(PayRulesArgs),
    /// Estimate hidden waste and template payback
    Roi(RoiArgs),
    /// Walk through all four diagnostic steps with sample inputs
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
        Command::HealthCheck(args) => run_health_check(args),
        Command::Evaluation(args) => run_evaluation(args),
        Command::PayRules(args) => run_pay_rules(args),
        Command::Roi(args) => run_roi(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
