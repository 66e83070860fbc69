//! Shared network state published by the Wi-Fi manager.
//!
//! The Wi-Fi manager owns this data and rewrites it as scans complete and
//! addresses change; HTTP handlers only copy values out. Handler-facing
//! accessors use a bounded wait so a busy writer can never stall the serve
//! loop for longer than [`LOCK_WAIT`]; a timeout is reported to the client
//! as 503 and is never retried server-side.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::timeout;

/// How long a handler waits for a state lock before giving up.
pub const LOCK_WAIT: Duration = Duration::from_millis(20);

/// Errors surfaced by bounded-wait state access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The lock could not be acquired within [`LOCK_WAIT`].
    #[error("timed out waiting for shared state lock")]
    LockTimeout,
}

/// Mutex-guarded snapshots of network state.
///
/// Each field has its own lock, and no lock is ever held across a network
/// write: readers clone the value out and release before responding.
/// A snapshot buffer is either a complete JSON document or absent.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Latest AP-scan result, serialized.
    ap_list: Mutex<Option<String>>,
    /// Latest address assignment, serialized.
    ip_info: Mutex<Option<String>>,
    /// Whether the autoexec command list runs at startup.
    autoexec: Mutex<bool>,
    /// Station address currently assigned by the joined network.
    sta_ip: Mutex<Option<String>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    async fn bounded<'a, T>(lock: &'a Mutex<T>) -> Result<MutexGuard<'a, T>, StateError> {
        timeout(LOCK_WAIT, lock.lock())
            .await
            .map_err(|_| StateError::LockTimeout)
    }

    /// Copy of the latest AP-scan JSON; `None` until a scan has completed.
    pub async fn ap_list_json(&self) -> Result<Option<String>, StateError> {
        Ok(Self::bounded(&self.ap_list).await?.clone())
    }

    /// Copy of the latest IP-info JSON; `None` while no address is assigned.
    pub async fn ip_info_json(&self) -> Result<Option<String>, StateError> {
        Ok(Self::bounded(&self.ip_info).await?.clone())
    }

    /// Whether autoexec is enabled.
    pub async fn autoexec_flag(&self) -> Result<bool, StateError> {
        Ok(*Self::bounded(&self.autoexec).await?)
    }

    /// Set the autoexec flag (bounded; handlers answer 503 on timeout).
    pub async fn set_autoexec_flag(&self, enabled: bool) -> Result<(), StateError> {
        *Self::bounded(&self.autoexec).await? = enabled;
        Ok(())
    }

    /// Copy of the current station IP, if one is assigned.
    pub async fn sta_ip(&self) -> Result<Option<String>, StateError> {
        Ok(Self::bounded(&self.sta_ip).await?.clone())
    }

    /// Writer access to the AP-scan buffer (unbounded wait; writer side).
    pub async fn ap_list_mut(&self) -> MutexGuard<'_, Option<String>> {
        self.ap_list.lock().await
    }

    /// Writer access to the IP-info buffer (unbounded wait; writer side).
    pub async fn ip_info_mut(&self) -> MutexGuard<'_, Option<String>> {
        self.ip_info.lock().await
    }

    /// Record the station address, or clear it on disconnect (writer side).
    pub async fn set_sta_ip(&self, ip: Option<String>) {
        *self.sta_ip.lock().await = ip;
    }
}
