mod lobby;

use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant, SystemTime};

use durak_core::protocol::ClientMessage;
use log::{info, warn};
use renet::transport::{NetcodeServerTransport, ServerAuthentication, ServerConfig};
use renet::{ConnectionConfig, DefaultChannel, RenetServer, ServerEvent};
use tokio::sync::mpsc::channel;
use tokio::time;

use crate::lobby::{LobbyManager, Outbound};

#[tokio::main]
async fn main() {
    env_logger::init();
    let port = std::env::args().nth(1).unwrap_or_else(|| "3000".to_string());
    let public_addr: SocketAddr = format!("0.0.0.0:{port}").parse().unwrap();
    let connection_config = ConnectionConfig::default();
    let mut server: RenetServer = RenetServer::new(connection_config);

    let current_time = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap();
    let server_config = ServerConfig {
        current_time,
        max_clients: 64,
        protocol_id: 0,
        public_addresses: vec![public_addr],
        authentication: ServerAuthentication::Unsecure,
    };
    let socket: UdpSocket = UdpSocket::bind(public_addr).unwrap();
    let mut transport = NetcodeServerTransport::new(server_config, socket).unwrap();

    let (outbound_tx, mut outbound_rx) = channel::<Outbound>(64);
    let mut manager = LobbyManager::new(outbound_tx);

    info!("listening on {public_addr}");

    let mut interval = time::interval(Duration::from_millis(50));
    let mut last_updated = Instant::now();
    loop {
        let now = Instant::now();
        let duration = now - last_updated;
        last_updated = now;

        server.update(duration);
        transport.update(duration, &mut server).unwrap();

        while let Some(event) = server.get_event() {
            match event {
                ServerEvent::ClientConnected { client_id } => {
                    info!("client {client_id} connected");
                }
                ServerEvent::ClientDisconnected { client_id, reason } => {
                    info!("client {client_id} disconnected: {reason}");
                    manager.disconnected(client_id).await;
                }
            }
        }

        for client_id in server.clients_id() {
            while let Some(message) =
                server.receive_message(client_id, DefaultChannel::ReliableOrdered)
            {
                match serde_json::from_slice::<ClientMessage>(&message) {
                    Ok(intent) => manager.handle(client_id, intent).await,
                    Err(err) => warn!("undecodable message from client {client_id}: {err}"),
                }
            }
        }

        transport.send_packets(&mut server);
        tokio::select! {
            _ = interval.tick() => {}
            data = outbound_rx.recv() => {
                if let Some(out) = data {
                    deliver(&mut server, out);
                    while let Ok(out) = outbound_rx.try_recv() {
                        deliver(&mut server, out);
                    }
                }
            }
        }
    }
}

fn deliver(server: &mut RenetServer, out: Outbound) {
    match serde_json::to_string(&out.message) {
        Ok(encoded) => {
            server.send_message(out.client, DefaultChannel::ReliableOrdered, encoded)
        }
        Err(err) => warn!("failed to encode outbound message: {err}"),
    }
}
