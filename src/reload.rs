//! Reload notifications over WebSocket.
//!
//! Dev hosts connect to `ws://<interface>:<reload_port>` and receive one text
//! frame per regenerated category:
//!
//! ```json
//! {"type":"update","category":"skills","module":"virtual:skills-data"}
//! ```
//!
//! The hub never reads from clients. A client whose send fails is dropped.

use crate::{content::Category, log};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::{
    net::{IpAddr, SocketAddr, TcpListener, TcpStream},
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};
use tungstenite::{Message, WebSocket};

/// Clients that stop reading are dropped after this long.
const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Peers that have not finished the upgrade request by then are rejected.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Receiver of "this category changed" notifications.
pub trait ReloadSink: Send + Sync {
    fn notify(&self, category: Category);
}

/// Sink for modes without connected clients (`folio watch`).
#[derive(Debug, Default)]
pub struct Silent;

impl ReloadSink for Silent {
    fn notify(&self, _category: Category) {}
}

/// Wire format of a reload notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReloadMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub category: &'static str,
    pub module: &'static str,
}

impl ReloadMessage {
    pub const fn update(category: Category) -> Self {
        Self {
            kind: "update",
            category: category.name(),
            module: category.virtual_id(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Connected WebSocket clients.
#[derive(Default)]
pub struct ReloadHub {
    clients: Mutex<Vec<WebSocket<TcpStream>>>,
}

impl ReloadHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept clients on `listener` in a background thread.
    ///
    /// Each handshake runs on its own thread, so a stalled peer only holds
    /// up itself.
    pub fn spawn(self: &Arc<Self>, listener: TcpListener) -> JoinHandle<()> {
        let hub = Arc::clone(self);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(e) => {
                        log!("reload"; "accept failed: {e}");
                        continue;
                    }
                };
                let hub = Arc::clone(&hub);
                thread::spawn(move || {
                    if let Err(e) = hub.accept(stream) {
                        log!("reload"; "client rejected: {e}");
                    }
                });
            }
        })
    }

    fn accept(&self, stream: TcpStream) -> Result<()> {
        let peer = stream.peer_addr().ok();
        stream.set_read_timeout(Some(HANDSHAKE_TIMEOUT))?;
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        let socket = tungstenite::accept(stream).map_err(|e| anyhow::anyhow!("handshake failed: {e}"))?;
        self.clients.lock().push(socket);
        if let Some(peer) = peer {
            log!("reload"; "client connected: {peer} ({} total)", self.client_count());
        }
        Ok(())
    }

    /// Send `text` to every client, dropping the ones that fail.
    /// Returns the number of clients reached.
    pub fn broadcast(&self, text: &str) -> usize {
        let mut clients = self.clients.lock();
        clients.retain_mut(|client| client.send(Message::text(text.to_owned())).is_ok());
        clients.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.lock().len()
    }
}

impl ReloadSink for ReloadHub {
    fn notify(&self, category: Category) {
        let reached = self.broadcast(&ReloadMessage::update(category).to_json());
        if reached > 0 {
            log!("reload"; "{} → {reached} client(s)", category.virtual_id());
        }
    }
}

/// Bind the reload listener, trying successive ports when busy.
pub fn bind(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(TcpListener, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries.max(1) {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);
        match TcpListener::bind(addr) {
            Ok(listener) => {
                if offset > 0 {
                    log!("reload"; "port {} in use, using {} instead", base_port, port);
                }
                let addr = listener.local_addr().unwrap_or(addr);
                return Ok((listener, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.map_or_else(
        || anyhow::anyhow!("no port to bind"),
        anyhow::Error::from,
    ))
    .with_context(|| format!("Failed to bind reload hub near port {base_port}"))
}

/// Records notifications, for watcher tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<Category>>,
}

#[cfg(test)]
impl ReloadSink for RecordingSink {
    fn notify(&self, category: Category) {
        self.events.lock().push(category);
    }
}
