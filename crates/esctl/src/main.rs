//! esctl binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use esctl::cli::{Cli, Commands};
use esctl::commands::{ClusterCommand, GetCommand};
use esctl::config::{ConfigFile, ConnectionConfig};
use esctl::{CliError, ElasticsearchClient};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Get(args) => {
            let config = ConnectionConfig::resolve(cli.connection_overrides(), || {
                ConfigFile::from_file(cli.config_path()?)
            })?;
            let client = ElasticsearchClient::new(&config)?;
            GetCommand::new(&client).execute(&mut stdout, args).await?;
        }
        Commands::ListClusters => {
            ClusterCommand::new(cli.config_path()?).list(&mut stdout)?;
        }
        Commands::SetCluster { name } => {
            ClusterCommand::new(cli.config_path()?).set_current(&mut stdout, name)?;
        }
    }

    Ok(())
}
