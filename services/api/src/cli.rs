use crate::demo::{run_demo, run_evaluate, run_generate, DemoArgs, EvaluateArgs, GenerateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use morphbox::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Morphological Box Explorer",
    about = "Sample and score combinations of a morphological box from the command line",
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
    /// Sample combinations from a box definition and print them as JSON or CSV
    Generate(GenerateArgs),
    /// Score a single combination against a box definition
    Evaluate(EvaluateArgs),
    /// Explore the bundled cargo e-bike box and print the best candidates
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
        Command::Generate(args) => run_generate(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["morphbox-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_accepts_sampling_overrides() {
        let cli = Cli::try_parse_from([
            "morphbox-api",
            "generate",
            "--box",
            "box.json",
            "--seed",
            "9",
            "--cap",
            "15",
            "--distinct",
            "--csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.seed, Some(9));
                assert_eq!(args.cap, Some(15));
                assert!(args.distinct);
                assert!(args.csv);
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }
}
