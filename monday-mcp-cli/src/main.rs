use std::process;

use clap::CommandFactory;
use is_terminal::IsTerminal;
use monday_mcp_cli::cli::{Cli, Commands};
use monday_mcp_cli::config::ConfigOverrides;
use monday_mcp_cli::error::{handle_cli_result, CliError};
use monday_mcp_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use monday_mcp_cli::search::SearchArgs;
use monday_mcp_cli::{aggregate, logging, search, serve};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help
    if cli.command.is_none() {
        let exit_code = match Cli::command().print_help() {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_ERROR,
        };
        process::exit(exit_code);
    }

    let is_mcp_mode =
        matches!(cli.command, Some(Commands::Serve)) && !std::io::stdin().is_terminal();
    let log_level = logging::log_level(is_mcp_mode, cli.quiet, cli.debug, cli.verbose);
    logging::init(is_mcp_mode, log_level);

    let overrides = ConfigOverrides::from_cli(&cli);

    let exit_code = match cli.command {
        Some(Commands::Serve) => {
            tracing::info!("Starting MCP server");
            serve::run_server(&overrides).await
        }
        Some(Commands::Search {
            search_type,
            term,
            workspace_ids,
            page,
            limit,
        }) => {
            tracing::info!("Running search command");
            let args = SearchArgs {
                search_type,
                term,
                workspace_ids,
                page,
                limit,
            };
            handle_cli_result(
                search::run_search_command(args, &overrides)
                    .await
                    .map_err(CliError::from_anyhow),
            )
        }
        Some(Commands::Aggregate { spec, dry_run }) => {
            tracing::info!("Running aggregate command");
            handle_cli_result(
                aggregate::run_aggregate_command(&spec, dry_run, &overrides)
                    .await
                    .map_err(CliError::from_anyhow),
            )
        }
        None => EXIT_SUCCESS,
    };

    process::exit(exit_code);
}
