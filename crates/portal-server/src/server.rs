//! The portal server: accept loop, connection handling and route handlers.
//!
//! Connections are served strictly one at a time in arrival order. The
//! accept loop never spawns per-connection tasks; a slow peer therefore
//! stalls the portal, which is acceptable for a configuration surface with
//! a handful of clients. Every request is answered with exactly one
//! response, and no state lock is held across a network write.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use portal_core::autoexec::{self, MAX_COMMAND_LINE_LEN};
use portal_core::escape::escape_quotes;
use portal_core::model::Credentials;
use portal_core::storage::CommandStore;

use crate::assets;
use crate::redirect::{self, Disposition};
use crate::request::{header_value, Request};
use crate::response;
use crate::routes::{self, Route};
use crate::state::SharedState;

/// Receive buffer size. A request is whatever arrives in the first read;
/// later segments are not reassembled.
const RECV_BUF_LEN: usize = 2048;

/// Configuration for the portal server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// The portal's canonical address, used for Host checks and redirects.
    pub ap_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:80".parse().unwrap(),
            ap_addr: "10.10.0.1".to_string(),
        }
    }
}

/// Fire-and-forget commands for the Wi-Fi manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WifiCommand {
    /// Start a fresh AP scan.
    StartScan,
    /// Join the network described by the credentials.
    Connect(Credentials),
    /// Leave the current network.
    Disconnect,
    /// Restore factory configuration.
    FactoryReset,
}

/// The captive-portal HTTP server.
pub struct PortalServer {
    config: ServerConfig,
    state: Arc<SharedState>,
    store: Arc<dyn CommandStore>,
    commands: mpsc::Sender<WifiCommand>,
}

impl PortalServer {
    /// Create a new portal server over injected state, storage and the
    /// Wi-Fi manager's command channel.
    pub fn new(
        config: ServerConfig,
        state: Arc<SharedState>,
        store: Arc<dyn CommandStore>,
        commands: mpsc::Sender<WifiCommand>,
    ) -> Self {
        Self {
            config,
            state,
            store,
            commands,
        }
    }

    /// Run the server, accepting and serving connections serially.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("portal HTTP server listening on {}", listener.local_addr()?);

        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    debug!("connection from {}", addr);
                    if let Err(e) = self.serve_connection(stream).await {
                        error!("connection error from {}: {}", addr, e);
                    }
                }
                Err(e) => {
                    error!("failed to accept connection: {}", e);
                }
            }
        }
    }

    /// Serve one connection: single read, parse, redirect or dispatch,
    /// exactly one response, close.
    async fn serve_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        let mut buf = [0u8; RECV_BUF_LEN];
        let n = stream.read(&mut buf).await?;
        let text = String::from_utf8_lossy(&buf[..n]);

        let Some(request) = Request::parse(&text) else {
            warn!("request without a request line, answering 404");
            return stream.write_all(response::NOT_FOUND.as_bytes()).await;
        };

        match redirect::decide(request.headers, &self.config.ap_addr, &self.state).await {
            Disposition::Redirect => {
                info!("redirecting to portal address {}", self.config.ap_addr);
                stream.write_all(response::REDIRECT_START.as_bytes()).await?;
                stream.write_all(self.config.ap_addr.as_bytes()).await?;
                stream.write_all(response::REDIRECT_END.as_bytes()).await
            }
            Disposition::Direct => self.dispatch(&request, &mut stream).await,
        }
    }

    async fn dispatch(&self, request: &Request<'_>, stream: &mut TcpStream) -> io::Result<()> {
        let route = request
            .method
            .and_then(|method| routes::resolve(method, request.path));

        let Some(route) = route else {
            warn!(
                "no route for {:?} {:?}, answering 400",
                request.method, request.path
            );
            return stream.write_all(response::BAD_REQUEST.as_bytes()).await;
        };

        match route {
            Route::Index => serve_asset(stream, response::OK_HTML, assets::INDEX_HTML).await,
            Route::JQuery => serve_asset(stream, response::OK_JS, assets::JQUERY_JS).await,
            Route::Script => serve_asset(stream, response::OK_JS, assets::CODE_JS).await,
            Route::Styles => serve_asset(stream, response::OK_CSS, assets::STYLE_CSS).await,
            Route::ApScan => self.handle_ap_scan(stream).await,
            Route::Status => self.handle_status(stream).await,
            Route::ReadConfig => self.handle_read_config(stream).await,
            Route::WriteConfig => self.handle_write_config(request.headers, stream).await,
            Route::Connect => self.handle_connect(request.headers, stream).await,
            Route::Disconnect => self.handle_disconnect(stream).await,
            Route::FactoryReset => self.handle_factory_reset(stream).await,
        }
    }

    /// GET /ap.json — serve the latest scan snapshot, then request a fresh
    /// scan so the next poll sees newer data.
    async fn handle_ap_scan(&self, stream: &mut TcpStream) -> io::Result<()> {
        match self.state.ap_list_json().await {
            Ok(Some(json)) => {
                stream
                    .write_all(response::OK_JSON_NO_CACHE.as_bytes())
                    .await?;
                stream.write_all(json.as_bytes()).await?;
            }
            Ok(None) | Err(_) => {
                error!("GET /ap.json: scan snapshot unavailable");
                stream.write_all(response::UNAVAILABLE.as_bytes()).await?;
            }
        }

        debug!("requesting wifi scan");
        self.send_command(WifiCommand::StartScan);
        Ok(())
    }

    /// GET /status.json — current address assignment.
    async fn handle_status(&self, stream: &mut TcpStream) -> io::Result<()> {
        match self.state.ip_info_json().await {
            Ok(Some(json)) => {
                stream
                    .write_all(response::OK_JSON_NO_CACHE.as_bytes())
                    .await?;
                stream.write_all(json.as_bytes()).await
            }
            Ok(None) | Err(_) => {
                error!("GET /status.json: address snapshot unavailable");
                stream.write_all(response::UNAVAILABLE.as_bytes()).await
            }
        }
    }

    /// GET /config.json — stream the autoexec list one entry at a time;
    /// the full document is never buffered.
    async fn handle_read_config(&self, stream: &mut TcpStream) -> io::Result<()> {
        let enabled = match self.state.autoexec_flag().await {
            Ok(enabled) => enabled,
            Err(e) => {
                error!("GET /config.json: {}", e);
                return stream.write_all(response::UNAVAILABLE.as_bytes()).await;
            }
        };

        stream
            .write_all(response::OK_JSON_NO_CACHE.as_bytes())
            .await?;

        let head = format!("{{ \"autoexec\": {}, \"list\": [", enabled as u8);
        stream.write_all(head.as_bytes()).await?;

        for index in 1.. {
            let key = autoexec::slot_key(index);
            // any failed lookup ends the list, gap and storage error alike
            let value = match self.store.load(&key) {
                Ok(Some(value)) => value,
                Ok(None) => break,
                Err(e) => {
                    error!("GET /config.json: {}: {}", key, e);
                    break;
                }
            };

            if index > 1 {
                stream.write_all(b",").await?;
            }
            let entry = format!("{{ \"{}\": \"{}\" }}", key, escape_quotes(&value));
            stream.write_all(entry.as_bytes()).await?;
        }

        stream.write_all(b"]}").await
    }

    /// POST /config.json — persist the enabled flag and the indexed
    /// command lines carried in X-Custom headers.
    async fn handle_write_config(&self, headers: &str, stream: &mut TcpStream) -> io::Result<()> {
        if let Some(raw) = header_value(headers, "X-Custom-autoexec: ").filter(|v| !v.is_empty()) {
            let enabled = leading_digits(raw) != 0;
            if let Err(e) = self.state.set_autoexec_flag(enabled).await {
                error!("POST /config.json: {}", e);
                return stream.write_all(response::UNAVAILABLE.as_bytes()).await;
            }
            if let Err(e) = self
                .store
                .save(autoexec::FLAG_KEY, if enabled { "1" } else { "0" })
            {
                error!("POST /config.json: {}", e);
                return stream.write_all(response::UNAVAILABLE.as_bytes()).await;
            }
            debug!("autoexec flag set to {}", enabled);
        }

        for index in 1.. {
            let name = format!("X-Custom-autoexec{index}: ");
            let Some(value) = header_value(headers, &name) else {
                break;
            };

            if value.len() >= MAX_COMMAND_LINE_LEN {
                error!("command line for slot {} is too long, skipping", index);
                continue;
            }

            let key = autoexec::slot_key(index);
            debug!("persisting {} = {:?}", key, value);
            if let Err(e) = self.store.save(&key, value) {
                error!("POST /config.json: {}: {}", key, e);
                return stream.write_all(response::UNAVAILABLE.as_bytes()).await;
            }
        }

        stream.write_all(response::OK_JSON_NO_CACHE.as_bytes()).await
    }

    /// POST /connect.json — validate credentials and hand them to the
    /// Wi-Fi manager; the response does not wait for the attempt.
    async fn handle_connect(&self, headers: &str, stream: &mut TcpStream) -> io::Result<()> {
        let ssid = header_value(headers, "X-Custom-ssid: ");
        let password = header_value(headers, "X-Custom-pwd: ");

        match ssid.zip(password).map(|(s, p)| Credentials::new(s, p)) {
            Some(Ok(credentials)) => {
                info!("connect requested for ssid {:?}", credentials.ssid);
                self.send_command(WifiCommand::Connect(credentials));
                stream.write_all(response::OK_JSON_NO_CACHE.as_bytes()).await
            }
            Some(Err(e)) => {
                error!("POST /connect.json: {}", e);
                stream.write_all(response::BAD_REQUEST.as_bytes()).await
            }
            None => {
                error!("POST /connect.json: credential headers missing");
                stream.write_all(response::BAD_REQUEST.as_bytes()).await
            }
        }
    }

    /// DELETE /connect.json — leave the current network and forget it.
    async fn handle_disconnect(&self, stream: &mut TcpStream) -> io::Result<()> {
        info!("disconnect requested");
        self.send_command(WifiCommand::Disconnect);
        stream.write_all(response::OK_JSON_NO_CACHE.as_bytes()).await
    }

    /// POST /factory.json — hand off to the factory-reset action.
    async fn handle_factory_reset(&self, stream: &mut TcpStream) -> io::Result<()> {
        warn!("factory reset requested");
        self.send_command(WifiCommand::FactoryReset);
        stream.write_all(response::OK_JSON_NO_CACHE.as_bytes()).await
    }

    /// Fire-and-forget: the response never waits on the Wi-Fi manager.
    fn send_command(&self, command: WifiCommand) {
        if let Err(e) = self.commands.try_send(command) {
            warn!("wifi command dropped: {}", e);
        }
    }
}

/// Write a canned header, then the asset bytes. Both live for the process
/// lifetime, so the write borrows them directly.
async fn serve_asset(
    stream: &mut TcpStream,
    header: &'static str,
    body: &'static [u8],
) -> io::Result<()> {
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(body).await
}

/// C-style numeric parse: value of the leading decimal digits, 0 when
/// there are none.
fn leading_digits(s: &str) -> u32 {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_digits() {
        assert_eq!(leading_digits("1"), 1);
        assert_eq!(leading_digits("0"), 0);
        assert_eq!(leading_digits("42abc"), 42);
        assert_eq!(leading_digits(""), 0);
        assert_eq!(leading_digits("abc"), 0);
    }
}
