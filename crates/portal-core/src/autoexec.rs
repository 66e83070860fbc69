//! The autoexec startup-command list.
//!
//! Commands are persisted under contiguous keys `autoexec1`, `autoexec2`, …
//! starting at index 1. There is no stored length: the list ends at the
//! first missing index, and other firmware components enumerate the same
//! way, so that termination rule must not change.

use crate::storage::{CommandStore, StorageError};

/// Upper bound on a single persisted command line, in bytes.
pub const MAX_COMMAND_LINE_LEN: usize = 256;

/// Storage key for the global enabled flag.
pub const FLAG_KEY: &str = "autoexec";

/// Storage key for the 1-based command slot `index`.
pub fn slot_key(index: usize) -> String {
    format!("autoexec{index}")
}

/// Load the command list in slot order.
///
/// Enumeration stops at the first slot whose lookup yields nothing,
/// whether the slot is absent or the lookup fails; anything persisted
/// beyond a gap is unreachable. Returns `(key, command)` pairs.
pub fn load_commands(store: &dyn CommandStore) -> Result<Vec<(String, String)>, StorageError> {
    let mut commands = Vec::new();
    for index in 1.. {
        let key = slot_key(index);
        match store.load(&key)? {
            Some(value) => commands.push((key, value)),
            None => break,
        }
    }
    Ok(commands)
}
