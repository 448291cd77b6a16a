use anyhow::Context;
use clap::Parser;

use barflow::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use barflow::adapter::inbound::cli::output::{self, OutputConfig};
use barflow::adapter::inbound::cli::{check, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = dispatch(cli.command).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => {
            run::execute(&args.config)
                .await
                .with_context(|| format!("run failed ({})", args.config.display()))?;
        }
        Commands::Check(CheckCommand::Config(args)) => {
            check::execute_config(&args.config)
                .with_context(|| format!("invalid configuration ({})", args.config.display()))?;
        }
    }
    Ok(())
}
