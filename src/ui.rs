//! Page decoration: the logout button and the session countdown.
//!
//! Both widgets are presentational. Styles travel with the [`Widget`] as
//! inline CSS so the host can apply them verbatim; behavior lives in the
//! guard, which owns the click and tick entry points.

use crate::host::{PageChrome, Widget};

pub const LOGOUT_BUTTON_ID: &str = "brandklout-logout";
pub const SESSION_INFO_ID: &str = "brandklout-session-info";

const LOGOUT_BUTTON_TEXT: &str = "\u{1F513} Logout";

const LOGOUT_BUTTON_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 10000; \
    background: rgba(231, 76, 60, 0.9); color: white; border: none; padding: 8px 16px; \
    border-radius: 6px; cursor: pointer; font-size: 12px; font-weight: 500; \
    transition: all 0.3s ease; backdrop-filter: blur(5px);";

const LOGOUT_BUTTON_HOVER_STYLE: &str = "background: rgba(231, 76, 60, 1); transform: scale(1.05);";

const SESSION_INFO_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; z-index: 9999; \
    background: rgba(52, 73, 94, 0.9); color: white; padding: 8px 12px; border-radius: 6px; \
    font-size: 11px; backdrop-filter: blur(5px); border: 1px solid rgba(255, 255, 255, 0.1);";

const MS_PER_HOUR: i64 = 60 * 60 * 1000;
const MS_PER_MINUTE: i64 = 60 * 1000;

/// `🕒 Session: 3h 42m remaining`, floored to whole minutes.
pub fn format_remaining(remaining_ms: i64) -> String {
    let hours = remaining_ms / MS_PER_HOUR;
    let minutes = (remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    format!("\u{1F552} Session: {}h {}m remaining", hours, minutes)
}

/// Mount the logout button, skipping if one is already on the page.
pub fn mount_logout_button(chrome: &mut dyn PageChrome) {
    if chrome.has_element(LOGOUT_BUTTON_ID) {
        return;
    }
    chrome.mount(Widget {
        id: LOGOUT_BUTTON_ID.to_string(),
        text: LOGOUT_BUTTON_TEXT.to_string(),
        style: LOGOUT_BUTTON_STYLE.to_string(),
        hover_style: Some(LOGOUT_BUTTON_HOVER_STYLE.to_string()),
    });
}

/// Countdown over the expiry captured at mount time.
///
/// The captured `expires` is deliberately not re-read from storage on later
/// renders: if the validator renews the record while the page is open, the
/// display keeps counting down from the stale expiry until the next page
/// load. Accepted staleness, not a bug.
#[derive(Debug)]
pub struct Countdown {
    expires: i64,
}

impl Countdown {
    /// Mount the indicator and capture the expiry. Returns `None` without
    /// mounting when the indicator already exists or no time remains.
    pub fn mount(chrome: &mut dyn PageChrome, expires: i64, now_ms: i64) -> Option<Self> {
        if chrome.has_element(SESSION_INFO_ID) {
            return None;
        }
        let remaining = expires - now_ms;
        if remaining <= 0 {
            return None;
        }
        chrome.mount(Widget {
            id: SESSION_INFO_ID.to_string(),
            text: format_remaining(remaining),
            style: SESSION_INFO_STYLE.to_string(),
            hover_style: None,
        });
        Some(Self { expires })
    }

    /// Re-render against a fresh `now`. Returns false once remaining time
    /// has run out; the caller logs out then.
    pub fn render(&self, chrome: &mut dyn PageChrome, now_ms: i64) -> bool {
        let remaining = self.expires - now_ms;
        if remaining > 0 {
            chrome.update_text(SESSION_INFO_ID, &format_remaining(remaining));
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeChrome;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(3 * MS_PER_HOUR + 42 * MS_PER_MINUTE),
            "\u{1F552} Session: 3h 42m remaining");
        assert_eq!(format_remaining(MS_PER_MINUTE - 1), "\u{1F552} Session: 0h 0m remaining");
        assert_eq!(format_remaining(4 * MS_PER_HOUR), "\u{1F552} Session: 4h 0m remaining");
    }

    #[test]
    fn test_logout_button_mounts_once() {
        let shared = FakeChrome::new(true);
        let mut chrome = shared.clone();

        mount_logout_button(&mut chrome);
        mount_logout_button(&mut chrome);

        assert_eq!(shared.mount_count(LOGOUT_BUTTON_ID), 1);
        let widget = shared.widget(LOGOUT_BUTTON_ID).unwrap();
        assert!(widget.style.contains("position: fixed"));
        assert!(widget.hover_style.is_some());
    }

    #[test]
    fn test_countdown_counts_down_and_expires() {
        let shared = FakeChrome::new(true);
        let mut chrome = shared.clone();

        let now = 1_000_000;
        let expires = now + 2 * MS_PER_HOUR;
        let countdown = Countdown::mount(&mut chrome, expires, now).unwrap();
        assert_eq!(
            shared.text_of(SESSION_INFO_ID).unwrap(),
            "\u{1F552} Session: 2h 0m remaining"
        );

        assert!(countdown.render(&mut chrome, now + MS_PER_MINUTE));
        assert_eq!(
            shared.text_of(SESSION_INFO_ID).unwrap(),
            "\u{1F552} Session: 1h 59m remaining"
        );

        // At the captured expiry the render reports expiry instead
        assert!(!countdown.render(&mut chrome, expires));
    }

    #[test]
    fn test_countdown_skips_when_no_time_left() {
        let shared = FakeChrome::new(true);
        let mut chrome = shared.clone();
        assert!(Countdown::mount(&mut chrome, 1_000, 1_000).is_none());
        assert!(!shared.has(SESSION_INFO_ID));
    }

    #[test]
    fn test_countdown_mount_is_idempotent() {
        let shared = FakeChrome::new(true);
        let mut chrome = shared.clone();

        let now = 0;
        let expires = MS_PER_HOUR;
        assert!(Countdown::mount(&mut chrome, expires, now).is_some());
        assert!(Countdown::mount(&mut chrome, expires, now).is_none());
        assert_eq!(shared.mount_count(SESSION_INFO_ID), 1);
    }
}
