use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sortd::banner::{BannerInfo, print_banner};
use sortd::config::ServerConfig;
use sortd::consts::{DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, default_max_workers};
use sortd::engine::concurrent::{ConcurrentSorter, OutputOrder};
use sortd::engine::sequential::SequentialSorter;
use sortd::server::{self, AppState};

#[derive(Parser)]
#[command(name = "sortd", version, about = "Sorts batches of integer arrays over HTTP.")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "SORTD_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "SORTD_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Maximum sort tasks running at once in concurrent mode
    #[arg(short = 'w', long, env = "SORTD_MAX_WORKERS", default_value_t = default_max_workers())]
    max_workers: usize,

    /// Output order for /process-concurrent
    #[arg(long, value_enum, env = "SORTD_ORDER", default_value_t = OutputOrder::Input)]
    order: OutputOrder,

    /// Reject request bodies larger than this many bytes (unlimited when unset)
    #[arg(long, env = "SORTD_MAX_BODY_BYTES")]
    max_body_bytes: Option<usize>,

    /// Tracing filter directives
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,

    /// Skip the startup banner
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            max_workers: cli.max_workers,
            order: cli.order,
            max_body_bytes: cli.max_body_bytes,
            log_filter: cli.log,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let config = ServerConfig::from(cli);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter)
                .with_context(|| format!("invalid log filter: {}", config.log_filter))?,
        )
        .init();

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let concurrent = Arc::new(ConcurrentSorter::new(config.max_workers, config.order));
    if !quiet {
        print_banner(&BannerInfo {
            addr: listener.local_addr()?,
            max_workers: concurrent.max_workers(),
            order: concurrent.order(),
        });
    }

    let state = Arc::new(
        AppState::new(Arc::new(SequentialSorter), concurrent)
            .with_body_limit(config.max_body_bytes),
    );
    server::serve(listener, state, server::shutdown_signal()).await
}
