use crate::commands::{run_calculate, run_factors, CalculateArgs, FactorsArgs};
use crate::server;
use carbon_footprint::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Carbon Footprint",
    about = "Estimate monthly carbon footprints and serve the calculator API",
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
    /// Compute one category's emissions from a JSON object of inputs
    Calculate(CalculateArgs),
    /// Print the emission-factor table
    Factors(FactorsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured SQLite database path
    #[arg(long)]
    pub(crate) database: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Factors(args) => run_factors(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["carbon-footprint-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn calculate_takes_category_and_inputs() {
        let cli = Cli::try_parse_from([
            "carbon-footprint-api",
            "calculate",
            "--category",
            "Food",
            "--inputs",
            r#"{"redMeatKg":1}"#,
            "--detailed",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Calculate(args)) => {
                assert_eq!(args.category, "Food");
                assert_eq!(args.inputs, r#"{"redMeatKg":1}"#);
                assert!(args.detailed);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "carbon-footprint-api",
            "serve",
            "--port",
            "8088",
            "--database",
            ":memory:",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8088));
                assert_eq!(args.database.as_deref(), Some(":memory:"));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
