use monday_mcp::mcp::McpServer;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;

use crate::config::ConfigOverrides;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};

/// Run the MCP server on stdio until ctrl-c or the client disconnects
pub async fn run_server(overrides: &ConfigOverrides) -> i32 {
    let config = match overrides.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to configure MCP server: {:#}", e);
            eprintln!("Error: {e:#}");
            return EXIT_ERROR;
        }
    };

    let server = match McpServer::from_config(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to create MCP server: {}", e);
            return EXIT_WARNING;
        }
    };
    tracing::info!("MCP server initialized with tools {:?}", server.tool_names());

    let ct = CancellationToken::new();
    let ct_clone = ct.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {}", e);
            return;
        }

        tracing::info!("Shutdown signal received");
        ct_clone.cancel();
    });

    match serve_server(server, stdio()).await {
        Ok(running_service) => {
            tracing::info!("MCP server started successfully");

            tokio::select! {
                _ = ct.cancelled() => {}
                result = running_service.waiting() => {
                    if let Err(e) = result {
                        tracing::error!("MCP server task failed: {}", e);
                        return EXIT_WARNING;
                    }
                }
            }

            tracing::info!("MCP server exited successfully");
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            EXIT_WARNING
        }
    }
}
