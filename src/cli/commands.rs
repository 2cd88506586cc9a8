//! CLI command implementations
//!
//! `serve` follows a strict boot sequence: configuration first, then the
//! store connection, and only then the HTTP listener. A failed connection
//! means the process never begins accepting requests.

use std::path::Path;

use crate::config::ServiceConfig;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::rest_api::ApiServer;
use crate::store::Store;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Boot the service and serve until the process exits
pub fn serve(config_path: &Path, port_override: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config =
        ServiceConfig::load(config_path).map_err(|e| CliError::config_error(e.to_string()))?;
    if let Some(port) = port_override {
        config.http.port = port;
    }

    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        // The listener must not start unless the connection succeeded
        let store = match Store::connect(config.store.clone()).await {
            Ok(store) => store,
            Err(e) => {
                let detail = e.to_string();
                log_event_with_fields(Event::StoreConnectFailed, &[("detail", detail.as_str())]);
                return Err(CliError::boot_failed(format!("DB connection error: {}", e)));
            }
        };
        log_event_with_fields(Event::StoreConnected, &[("database", store.database())]);

        let server = ApiServer::new(config.http.clone(), &store);
        server
            .serve()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
