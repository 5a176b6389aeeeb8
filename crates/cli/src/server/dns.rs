use hickory_server::ServerFuture;
use nimbus_dns_infrastructure::dns::DnsServerHandler;
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::info;

const TCP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Bind the listeners and serve until `shutdown` fires.
pub async fn start_dns_server(
    bind_addr: String,
    tcp_enabled: bool,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr = SocketAddr::from_str(&bind_addr)?;

    info!(bind_address = %socket_addr, "Starting DNS server");

    let mut server = ServerFuture::new(handler);

    let udp_socket = UdpSocket::bind(socket_addr).await?;
    server.register_socket(udp_socket);
    info!(protocol = "UDP", "DNS server listening");

    if tcp_enabled {
        let tcp_listener = TcpListener::bind(socket_addr).await?;
        server.register_listener(tcp_listener, TCP_TIMEOUT);
        info!(protocol = "TCP", "DNS server listening");
    }

    info!("DNS server ready to accept queries");

    tokio::select! {
        result = server.block_until_done() => {
            result?;
            return Ok(());
        }
        _ = shutdown.cancelled() => {}
    }

    info!("DNS server shutting down");
    server.shutdown_gracefully().await?;

    Ok(())
}
