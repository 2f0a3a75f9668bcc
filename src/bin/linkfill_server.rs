//! Linkfill API server binary
//!
//! HTTP front end for the short-link template merge: upload both
//! spreadsheets, review the group preview, confirm file names, download
//! one .xlsx per copy group.

use clap::Parser;
use linkfill::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "linkfill-server")]
#[command(version)]
#[command(about = "Linkfill API Server - HTTP front end for the short-link template merge")]
#[command(long_about = r#"
Linkfill API Server

Endpoints:
  - POST /api/v1/analyze   - Upload source + template .xlsx, get the group preview
  - POST /api/v1/confirm   - Confirm per-group output file names
  - GET  /api/v1/download/{session}/{group} - Download one group's .xlsx

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Tracing and structured logging

Example usage:
  linkfill-server                           # Start on localhost:8080
  linkfill-server --host 0.0.0.0 --port 3000

  curl -F source=@links.xlsx -F template=@template.xlsx \
    http://localhost:8080/api/v1/analyze
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "LINKFILL_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "LINKFILL_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
