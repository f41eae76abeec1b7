//! Best-effort anti-inspection deterrents.
//!
//! **These are not a security boundary.** Suppressing the context menu and a
//! handful of devtools shortcuts inconveniences a casual viewer and nothing
//! more: storage, network traffic, and page source remain fully readable by
//! any determined client. Nothing downstream may rely on this module for
//! confidentiality or integrity.
//!
//! Suppression is disabled entirely on recognized local-development hosts.

/// A keydown event as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key value as the browser reports it, e.g. `"F12"`, `"I"`, `"u"`.
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            shift: false,
        }
    }
}

pub fn is_local_host(local_hosts: &[String], hostname: &str) -> bool {
    local_hosts.iter().any(|h| h == hostname)
}

/// Whether a context-menu (right-click) event should be suppressed.
pub fn suppress_context_menu(local_hosts: &[String], hostname: &str) -> bool {
    !is_local_host(local_hosts, hostname)
}

/// Whether a keydown should be suppressed: F12, Ctrl+Shift+I, or Ctrl+U
/// outside local development. Key values match what browsers report, so the
/// shifted chord carries uppercase `I` and the plain chord lowercase `u`.
pub fn suppress_key(local_hosts: &[String], hostname: &str, key: &KeyPress) -> bool {
    if is_local_host(local_hosts, hostname) {
        return false;
    }
    key.key == "F12"
        || (key.ctrl && key.shift && key.key == "I")
        || (key.ctrl && key.key == "u")
}
