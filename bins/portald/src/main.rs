use std::sync::Arc;
use std::time::Duration;

use portal_core::autoexec::FLAG_KEY;
use portal_core::{AccessPoint, CommandStore, FileCommandStore, IpInfo};
use portal_server::{PortalServer, ServerConfig, SharedState, WifiCommand};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,portal_server=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("configuration portal starting...");

    // Configuration
    let bind_addr = std::env::var("PORTAL_BIND")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()?;
    let ap_addr = std::env::var("PORTAL_AP_ADDR").unwrap_or_else(|_| "10.10.0.1".into());
    let store_path =
        std::env::var("PORTAL_STORE").unwrap_or_else(|_| "portal-config.json".into());

    let state = Arc::new(SharedState::new());
    let store: Arc<dyn CommandStore> = Arc::new(FileCommandStore::new(&store_path));
    let (command_tx, command_rx) = mpsc::channel(16);

    // Seed the autoexec flag from persisted config; nothing contends for
    // the state locks this early.
    match store.load(FLAG_KEY) {
        Ok(Some(flag)) => {
            let _ = state.set_autoexec_flag(flag == "1").await;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("could not read persisted config: {}", e),
    }

    let config = ServerConfig {
        bind_addr,
        ap_addr: ap_addr.clone(),
    };
    let server = PortalServer::new(config, state.clone(), store, command_tx);

    // Spawn the portal server
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            tracing::error!("portal server error: {}", e);
        }
    });

    // Spawn the simulated Wi-Fi manager
    let wifi_handle = tokio::spawn(wifi_manager_sim(state.clone(), command_rx));

    tracing::info!("🚀 configuration portal ready!");
    tracing::info!("   portal page: http://{}:{}/", ap_addr, bind_addr.port());
    tracing::info!("   persisted config: {}", store_path);
    tracing::info!("");
    tracing::info!("Try these commands:");
    tracing::info!("   curl http://localhost:{}/ap.json", bind_addr.port());
    tracing::info!("   curl http://localhost:{}/status.json", bind_addr.port());
    tracing::info!("   curl http://localhost:{}/config.json", bind_addr.port());

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = server_handle => {
            tracing::warn!("portal server stopped");
        }
        _ = wifi_handle => {
            tracing::warn!("wifi manager stopped");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Simulated Wi-Fi manager.
///
/// Consumes portal commands and publishes plausible scan and address
/// snapshots, standing in for the device's Wi-Fi state machine during
/// development. Snapshots are written under the same locks the real
/// manager would use, so the portal behaves identically.
async fn wifi_manager_sim(state: Arc<SharedState>, mut commands: mpsc::Receiver<WifiCommand>) {
    // initial snapshot so the first page load has data
    publish_scan(&state).await;

    while let Some(command) = commands.recv().await {
        match command {
            WifiCommand::StartScan => {
                tracing::debug!("scan requested");
                tokio::time::sleep(Duration::from_millis(200)).await;
                publish_scan(&state).await;
            }
            WifiCommand::Connect(credentials) => {
                tracing::info!("connecting to {:?}", credentials.ssid);
                tokio::time::sleep(Duration::from_millis(500)).await;

                let info = IpInfo {
                    ssid: credentials.ssid.clone(),
                    ip: "192.168.1.50".to_string(),
                    netmask: "255.255.255.0".to_string(),
                    gw: "192.168.1.1".to_string(),
                    urc: 0,
                };
                match serde_json::to_string(&info) {
                    Ok(json) => *state.ip_info_mut().await = Some(json),
                    Err(e) => tracing::error!("failed to encode ip info: {}", e),
                }
                state.set_sta_ip(Some(info.ip)).await;
                tracing::info!("connected, station address 192.168.1.50");
            }
            WifiCommand::Disconnect => {
                tracing::info!("disconnecting");
                *state.ip_info_mut().await = None;
                state.set_sta_ip(None).await;
            }
            WifiCommand::FactoryReset => {
                tracing::warn!("factory reset requested (simulated: clearing state)");
                *state.ip_info_mut().await = None;
                state.set_sta_ip(None).await;
            }
        }
    }
}

/// Publish a fixed set of nearby networks as the scan snapshot.
async fn publish_scan(state: &SharedState) {
    let aps = vec![
        AccessPoint {
            ssid: "HomeNetwork".to_string(),
            chan: 6,
            rssi: -42,
            auth: 3,
        },
        AccessPoint {
            ssid: "CoffeeShop".to_string(),
            chan: 11,
            rssi: -68,
            auth: 0,
        },
        AccessPoint {
            ssid: "Neighbor 2.4GHz".to_string(),
            chan: 1,
            rssi: -81,
            auth: 3,
        },
    ];

    match serde_json::to_string(&aps) {
        Ok(json) => *state.ap_list_mut().await = Some(json),
        Err(e) => tracing::error!("failed to encode scan result: {}", e),
    }
}
