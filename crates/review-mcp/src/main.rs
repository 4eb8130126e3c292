//! MCP server for reviewing Anki cards via AnkiConnect.
//!
//! Exposes saved searches as resources and the review, deck and card
//! operations of review-engine as tools for LLM assistants.

mod server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use review_engine::tools::{ToolSettings, catalog};
use review_engine::{AnkiClient, Dispatcher};
use rmcp::ServiceExt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::server::ReviewServer;

/// MCP server for reviewing Anki cards via AnkiConnect.
#[derive(Parser, Debug)]
#[command(name = "review-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// AnkiConnect host address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// AnkiConnect port
    #[arg(long, default_value_t = 8765)]
    port: u16,

    /// AnkiConnect API key, if one is configured in the add-on
    #[arg(long)]
    api_key: Option<String>,

    /// Seconds to wait for each AnkiConnect response
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Read-only mode (disables write operations)
    #[arg(long, default_value_t = false)]
    read_only: bool,

    /// Deck that add_card creates cards in
    #[arg(long, default_value = "Default")]
    default_deck: String,

    /// Note type that add_card uses; needs Front and Back fields
    #[arg(long, default_value = "Basic")]
    default_model: String,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Transport mode: stdio (default) or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value_t = 3000)]
    http_port: u16,

    /// HTTP server bind address (only used with --transport http)
    #[arg(long, default_value = "127.0.0.1")]
    http_host: String,
}

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Transport {
    /// Standard I/O transport (default, for CLI integration)
    #[default]
    Stdio,
    /// Streamable HTTP transport (for remote connections)
    Http,
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "http" => Ok(Transport::Http),
            _ => Err(format!("Invalid transport: {s}. Use 'stdio' or 'http'")),
        }
    }
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    fn client(&self) -> review_connect::Result<AnkiClient> {
        let mut builder = AnkiClient::builder()
            .url(format!("http://{}:{}", self.host, self.port))
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            default_deck: self.default_deck.clone(),
            default_model: self.default_model.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // stdout carries the stdio transport; RUST_LOG wins over -v when set
    let filter = EnvFilter::builder()
        .with_default_directive(args.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = args.client()?;
    info!(
        anki_url = %client.url(),
        read_only = args.read_only,
        transport = ?args.transport,
        "Starting review-mcp server"
    );

    let dispatcher = Dispatcher::new(Arc::new(client), catalog(&args.tool_settings()))
        .read_only(args.read_only);
    let server = ReviewServer::new(dispatcher);

    match args.transport {
        Transport::Stdio => {
            let transport = (tokio::io::stdin(), tokio::io::stdout());
            let mcp_server = server.serve(transport).await?;
            mcp_server.waiting().await?;
        }
        Transport::Http => {
            use rmcp::transport::streamable_http_server::{
                StreamableHttpServerConfig, StreamableHttpService,
                session::local::LocalSessionManager,
            };

            let bind_addr = format!("{}:{}", args.http_host, args.http_port);
            let service: StreamableHttpService<ReviewServer, LocalSessionManager> =
                StreamableHttpService::new(
                    move || Ok(server.clone()),
                    Arc::new(LocalSessionManager::default()),
                    StreamableHttpServerConfig::default(),
                );

            let router = axum::Router::new().nest_service("/mcp", service);
            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            info!(bind_addr = %bind_addr, "MCP server listening on HTTP");

            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
