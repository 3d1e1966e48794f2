//! Runs the storage inspector backend for the devtools extension.
//!
//! Usage: `storage-inspector --port 4850`

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use storage_inspector::server::{Server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storage-inspector", about = "Inspect and edit a page's Web Storage from devtools")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "STORAGE_INSPECTOR_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on; 0 picks a free one.
    #[arg(long, env = "STORAGE_INSPECTOR_PORT", default_value_t = 4850)]
    port: u16,

    /// Directory holding settings.json.
    #[arg(long, env = "STORAGE_INSPECTOR_SETTINGS_DIR")]
    settings_dir: Option<PathBuf>,

    /// Give up on a remote evaluation after this many seconds.
    #[arg(long)]
    eval_timeout_secs: Option<u64>,
}

fn default_settings_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storage-inspector")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storage_inspector=info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig {
        addr: SocketAddr::new(args.host, args.port),
        settings_dir: args.settings_dir.unwrap_or_else(default_settings_dir),
        eval_timeout: args.eval_timeout_secs.map(Duration::from_secs),
    };
    tracing::info!(settings_dir = %config.settings_dir.display(), "starting");

    let mut server = Server::new(config).await?;
    println!("storage inspector listening on http://{}", server.addr());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown()?;
    Ok(())
}
