use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::application::{CsvToMovesUseCase, MergeSkusUseCase};
use crate::domain::error::{AppError, Result};
use crate::domain::moves::MoveBatch;
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::csv::{read_csv_file, write_sample_csv};
use crate::infrastructure::task_api::GoodDayClient;
use crate::interfaces::http::start_server;

#[derive(Debug, Parser)]
#[command(name = "skumerge")]
#[command(about = "Turn SKU merge CSV files into GoodDay items-move requests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the local relay in front of the GoodDay API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the move batch for a CSV file
    Transform {
        csv: PathBuf,
        #[arg(long)]
        force: bool,
        #[arg(long)]
        compact: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Transform a CSV file and send it to the GoodDay API
    Send {
        csv: PathBuf,
        #[arg(long)]
        force: bool,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Write the example merge CSV
    Sample {
        #[arg(long, default_value = "sample.csv")]
        out: PathBuf,
    },
    /// Manage the API key kept in the OS keyring
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    Set { key: String },
    Delete,
    Status,
}

pub async fn execute(cli: Cli, config_service: &ConfigService) -> Result<()> {
    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config_service.load()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(&config).await
        }
        Commands::Transform {
            csv,
            force,
            compact,
            out,
        } => {
            let batch = load_batch(&csv, force)?;
            let rendered = render_batch(&batch, compact)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, rendered).map_err(|e| {
                        AppError::IoError(format!("Failed to write {}: {}", path.display(), e))
                    })?;
                    println!("Wrote {} moves to {}", batch.len(), path.display());
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }
        Commands::Send {
            csv,
            force,
            api_key,
        } => {
            let config = config_service.load()?;
            let api_key = config_service
                .resolve_api_key(api_key.as_deref(), &config)?
                .ok_or_else(|| {
                    AppError::ValidationError(
                        "Please enter your API key before merging SKUs.".to_string(),
                    )
                })?;

            let batch = load_batch(&csv, force)?;
            let client = GoodDayClient::new(&config.upstream_url, config.upstream_timeout_secs)?;
            let output = MergeSkusUseCase::new(Arc::new(client))
                .execute(&api_key, &batch)
                .await?;
            println!("{}", output);
            Ok(())
        }
        Commands::Sample { out } => {
            write_sample_csv(&out)?;
            println!("Sample CSV file written to {}", out.display());
            Ok(())
        }
        Commands::Key { command } => match command {
            KeyCommand::Set { key } => {
                let key = key.trim();
                if key.is_empty() {
                    return Err(AppError::ValidationError("API key is empty.".to_string()));
                }
                config_service.save_api_key(key)?;
                println!("Key Entered");
                Ok(())
            }
            KeyCommand::Delete => {
                config_service.delete_api_key()?;
                println!("No Key");
                Ok(())
            }
            KeyCommand::Status => {
                let config = config_service.load()?;
                let status = match config_service.resolve_api_key(None, &config)? {
                    Some(_) => "Key Entered",
                    None => "No Key",
                };
                println!("{}", status);
                Ok(())
            }
        },
    }
}

async fn serve(config: &AppConfig) -> Result<()> {
    let client = GoodDayClient::new(&config.upstream_url, config.upstream_timeout_secs)?;
    tracing::info!(upstream = %client.move_url(), "relay upstream configured");

    let server = start_server(config, Arc::new(client)).map_err(|e| {
        AppError::IoError(format!(
            "Failed to bind {}:{}: {}",
            config.host, config.port, e
        ))
    })?;
    server
        .await
        .map_err(|e| AppError::Internal(format!("Server stopped with error: {}", e)))
}

fn load_batch(path: &Path, force: bool) -> Result<MoveBatch> {
    let source = read_csv_file(path)?;
    CsvToMovesUseCase::new().execute_source(&source, force)
}

/// Two-space indented JSON unless `compact` is set.
fn render_batch(batch: &MoveBatch, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(batch)
    } else {
        serde_json::to_string_pretty(batch)
    };
    rendered.map_err(|e| AppError::ParseError(format!("Failed to serialize moves: {}", e)))
}
