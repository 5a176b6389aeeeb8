//! # Nimbus DNS
//!
//! Authoritative answers for OpenStack compute instances.

use clap::Parser;
use nimbus_dns_domain::CliOverrides;
use nimbus_dns_infrastructure::dns::DnsServerHandler;
use nimbus_dns_jobs::InventoryRefreshJob;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "nimbus-dns")]
#[command(version)]
#[command(about = "DNS records for OpenStack instances")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Nimbus DNS starting");

    let services = di::Services::new(&config)?;

    // Serve from a populated directory when the inventory is reachable.
    match services.refresher.execute().await {
        Ok(stats) => info!(
            hosts = stats.hosts,
            names = stats.names,
            "Initial inventory loaded"
        ),
        Err(e) => warn!(error = %e, "Initial inventory refresh failed; starting with an empty directory"),
    }

    let refresh_job = InventoryRefreshJob::new(
        services.refresher.clone(),
        config.openstack.reload_interval(),
    )
    .start();

    let shutdown = CancellationToken::new();
    let mut dns_task = tokio::spawn(server::start_dns_server(
        config.dns_bind_address(),
        config.server.tcp_enabled,
        DnsServerHandler::new(services.handler.clone()),
        shutdown.clone(),
    ));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        result = &mut dns_task => {
            // Listener ended on its own: bind failure or fatal socket error.
            if let Some(job) = refresh_job {
                job.stop().await;
            }
            return match result {
                Ok(inner) => inner,
                Err(e) => Err(e.into()),
            };
        }
    }

    if let Some(job) = refresh_job {
        job.stop().await;
    }
    shutdown.cancel();
    dns_task.await??;

    let answered = services
        .dispatcher
        .metrics()
        .answered
        .load(std::sync::atomic::Ordering::Relaxed);
    info!(answered, names = services.store.current().name_count(), "Nimbus DNS stopped");

    Ok(())
}
