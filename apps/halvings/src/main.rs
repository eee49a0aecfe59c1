use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use halvings_chart::{JsonFileSurface, ProxySource, RefreshTask, refresh_once};
use halvings_cryptocompare::CryptocompareClient;
use halvings_proxy::AppState;
use halvings_shared_models::halvings;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve /api/bitcoin (and the public directory)
    Serve {
        /// Port to listen on (default: $PORT or 3000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: $BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,

        /// Directory of static files (default: $PUBLIC_DIR or public)
        #[arg(long)]
        public_dir: Option<PathBuf>,

        /// Only serve the API
        #[arg(long)]
        no_static: bool,
    },

    /// Keep a chart document of the proxied price history up to date
    Watch {
        /// Base URL of the proxy (default: $PROXY_URL)
        #[arg(long)]
        proxy_url: Option<String>,

        /// Where the chart document is written (default: $CHART_OUT)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Seconds between refreshes (default: $REFRESH_SECS or 300)
        #[arg(long)]
        every: Option<u64>,

        /// Render a single time and exit
        #[arg(long)]
        once: bool,
    },
}

async fn serve(
    cfg: Config,
    port: Option<u16>,
    bind: Option<String>,
    public_dir: Option<PathBuf>,
    no_static: bool,
) -> anyhow::Result<()> {
    let port = port.unwrap_or(cfg.port);
    let bind = bind.unwrap_or(cfg.bind);
    let public_dir = public_dir.unwrap_or(cfg.public_dir);

    let upstream = CryptocompareClient::new(cfg.cryptocompare_api_key.as_deref())
        .context("Failed to build CryptoCompare client")?
        .with_base_url(cfg.cryptocompare_url);

    let static_dir = if no_static {
        None
    } else if public_dir.is_dir() {
        Some(public_dir.as_path())
    } else {
        tracing::warn!(dir = %public_dir.display(), "public directory not found, serving API only");
        None
    };

    let app = halvings_proxy::app(AppState::new(upstream), static_dir);

    let addr = listen_addr(&bind, port)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server running on port {port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn watch(
    cfg: Config,
    proxy_url: Option<String>,
    out: Option<PathBuf>,
    every: Option<u64>,
    once: bool,
) -> anyhow::Result<()> {
    let source = ProxySource::new(&proxy_url.unwrap_or(cfg.proxy_url));
    let mut surface = JsonFileSurface::new(out.unwrap_or(cfg.chart_out));

    if once {
        let events = halvings();
        return match refresh_once(&source, &mut surface, None, &events).await {
            Some(chart) => {
                println!("Chart written to {}", chart.path.display());
                Ok(())
            }
            None => Err(anyhow::anyhow!("No chart rendered from {}", source.url())),
        };
    }

    let period = Duration::from_secs(every.unwrap_or(cfg.refresh_secs).max(1));
    tracing::info!(url = %source.url(), out = %surface.path().display(), ?period, "watching");

    let task = RefreshTask::spawn(source, surface, period);
    shutdown_signal().await;

    let (_surface, current) = task.stop().await.context("Refresh task failed")?;
    if let Some(chart) = current {
        tracing::info!(path = %chart.path.display(), generation = chart.generation, "last chart kept");
    }

    Ok(())
}

/// Accepts bare IPv4 or IPv6 hosts, so `::` works as well as `0.0.0.0`.
fn listen_addr(bind: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;
    Ok(SocketAddr::new(ip, port))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping…");
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = Config::from_env();

    let rt = tokio::runtime::Runtime::new()?;

    match args.command {
        Command::Serve {
            port,
            bind,
            public_dir,
            no_static,
        } => rt.block_on(serve(cfg, port, bind, public_dir, no_static)),
        Command::Watch {
            proxy_url,
            out,
            every,
            once,
        } => rt.block_on(watch(cfg, proxy_url, out, every, once)),
    }
}
