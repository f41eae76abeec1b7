//! Host-environment seams.
//!
//! The guard originally ran against a browser: `location`, the DOM, a
//! `confirm` dialog, and interval timers. Each is a small trait here so the
//! guard is built from plain parts, driven by whatever host embeds it and
//! deterministically by tests (doubles live in [`crate::testing`]).

use chrono::Utc;

/// Epoch-millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// The browser location: where the page is and how to leave it.
///
/// `navigate` is a full page navigation. Once it fires the real page is
/// unloading; nothing the guard does afterwards on this page load matters.
pub trait Navigator {
    /// Path component of the current URL, e.g. `/reports/daily.html`.
    fn current_path(&self) -> String;

    /// Hostname the page was served from, used only to gate the
    /// anti-inspection deterrents.
    fn hostname(&self) -> String;

    fn navigate(&mut self, target: &str);
}

/// A fixed-position element the guard asks the page to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    /// Element id, also the idempotence key: mounting an id that already
    /// exists is a no-op.
    pub id: String,
    pub text: String,
    /// Inline CSS for the element.
    pub style: String,
    /// Inline CSS applied while hovered, for elements that react to it.
    pub hover_style: Option<String>,
}

/// The DOM seam: readiness, widget mounts, and the confirm dialog.
pub trait PageChrome {
    /// Whether DOM content has finished loading. When false, the host is
    /// expected to call `SessionGuard::on_dom_ready` once it has.
    fn is_ready(&self) -> bool;

    fn has_element(&self, id: &str) -> bool;

    fn mount(&mut self, widget: Widget);

    fn update_text(&mut self, id: &str, text: &str);

    /// Modal yes/no prompt; returns the user's answer.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Opaque handle to a recurring timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Interval timer registration.
///
/// The host owns the event loop: it delivers each tick by calling
/// `SessionGuard::fire` with the handle returned here. The guard only
/// registers and cancels intervals; it never blocks or spawns threads.
pub trait Timers {
    fn set_interval(&mut self, period_ms: i64) -> TimerId;

    fn clear_interval(&mut self, id: TimerId);
}
