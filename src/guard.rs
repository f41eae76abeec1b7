//! The guard itself: one instance per page load, owning its host seams and
//! its two interval handles.
//!
//! Lifecycle: construct, [`SessionGuard::init`] once, forward DOM readiness
//! ([`SessionGuard::on_dom_ready`]), timer ticks ([`SessionGuard::fire`]) and
//! UI events, [`SessionGuard::shutdown`] on teardown. The browser original
//! leaned on page unload to drop its intervals; embedders get the explicit
//! teardown instead.

use tracing::{debug, info, warn};

use crate::config::GuardConfig;
use crate::error::GuardError;
use crate::host::{Clock, Navigator, PageChrome, TimerId, Timers};
use crate::redirect;
use crate::security::{self, KeyPress};
use crate::session::SessionRecord;
use crate::storage::Storage;
use crate::ui::{self, Countdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No valid session established for this page load.
    Checking,
    /// Valid session; page decorated, or decoration pending DOM readiness.
    Active,
    /// This page is the auth page itself; the guard does nothing here.
    /// Redirecting from the auth page would loop forever.
    Disarmed,
}

pub struct SessionGuard {
    config: GuardConfig,
    /// Persistent store holding the Session Record.
    storage: Box<dyn Storage>,
    /// Tab-scoped store holding the Return-Page Marker.
    session_store: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    navigator: Box<dyn Navigator>,
    chrome: Box<dyn PageChrome>,
    timers: Box<dyn Timers>,
    state: GuardState,
    check_timer: Option<TimerId>,
    countdown_timer: Option<TimerId>,
    countdown: Option<Countdown>,
    decorate_pending: bool,
}

impl SessionGuard {
    pub fn new(
        config: GuardConfig,
        storage: Box<dyn Storage>,
        session_store: Box<dyn Storage>,
        clock: Box<dyn Clock>,
        navigator: Box<dyn Navigator>,
        chrome: Box<dyn PageChrome>,
        timers: Box<dyn Timers>,
    ) -> Self {
        Self {
            config,
            storage,
            session_store,
            clock,
            navigator,
            chrome,
            timers,
            state: GuardState::Checking,
            check_timer: None,
            countdown_timer: None,
            countdown: None,
            decorate_pending: false,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn check_timer(&self) -> Option<TimerId> {
        self.check_timer
    }

    pub fn countdown_timer(&self) -> Option<TimerId> {
        self.countdown_timer
    }

    /// Run the page-load sequence: skip entirely on the auth page, otherwise
    /// validate once, decorate on success, and start the periodic re-check
    /// whatever the first validation said. A session can expire while the
    /// tab sits open without interaction; the re-check catches that.
    pub fn init(&mut self) {
        let path = self.navigator.current_path();
        let page = redirect::current_page(&path, &self.config.default_return_page);
        if page == self.config.auth_page {
            self.state = GuardState::Disarmed;
            return;
        }

        if self.check_auth() {
            self.state = GuardState::Active;
            if self.chrome.is_ready() {
                self.decorate();
            } else {
                self.decorate_pending = true;
            }
        }

        self.check_timer = Some(self.timers.set_interval(self.config.check_interval_ms));
    }

    /// Validate the stored session, renewing or discarding it as needed.
    ///
    /// Absent, corrupt, and expired records all collapse to the same path:
    /// discard whatever is stored and send the browser to the auth page.
    /// No storage or parse error escapes this method.
    pub fn check_auth(&mut self) -> bool {
        let now = self.clock.now_ms();
        match self.load_record(now) {
            Ok(mut record) => {
                if record.renew_if_due(now, self.config.session_duration_ms) {
                    debug!(expires = record.expires, "session renewed");
                    self.store_record(&record);
                }
                true
            }
            Err(GuardError::MissingSession) => {
                self.redirect_to_auth();
                false
            }
            Err(e) => {
                debug!(reason = %e, "discarding session record");
                self.discard_record();
                self.redirect_to_auth();
                false
            }
        }
    }

    /// Remember which page we were on, then send the browser to the auth
    /// page, resolved relative to the current location.
    pub fn redirect_to_auth(&mut self) {
        let path = self.navigator.current_path();
        let page = redirect::current_page(&path, &self.config.default_return_page);
        if let Err(e) = self.session_store.set(&self.config.return_page_key, &page) {
            warn!(error = %e, "failed to record return page");
        }

        let target = redirect::auth_path(&path, &self.config.auth_page);
        debug!(%target, "redirecting to auth page");
        self.navigator.navigate(&target);
    }

    /// Clear the session and return to the auth page.
    ///
    /// This is the externally callable logout entry point: the button, the
    /// countdown reaching zero, and embedding scripts all come through here.
    /// Safe to call with no session present. Navigates to the bare auth page
    /// filename, not through the redirect path heuristic.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(&self.config.session_key) {
            warn!(error = %e, "failed to clear session record");
        }
        if let Err(e) = self.session_store.remove(&self.config.return_page_key) {
            warn!(error = %e, "failed to clear return page");
        }
        info!("logged out");
        let target = self.config.auth_page.clone();
        self.navigator.navigate(&target);
    }

    /// Host entry point for DOM readiness, for pages where the guard ran
    /// before content finished loading.
    pub fn on_dom_ready(&mut self) {
        if self.decorate_pending && self.state == GuardState::Active {
            self.decorate_pending = false;
            self.decorate();
        }
    }

    /// Host entry point for clicks on the logout button.
    pub fn on_logout_clicked(&mut self) {
        if self.chrome.confirm("Are you sure you want to logout?") {
            self.logout();
        }
    }

    /// Host entry point for interval ticks. Unknown ids are ignored.
    pub fn fire(&mut self, id: TimerId) {
        if self.check_timer == Some(id) {
            self.check_auth();
        } else if self.countdown_timer == Some(id) {
            self.render_countdown();
        }
    }

    /// Whether a context-menu event should be suppressed on this host.
    /// Cosmetic deterrence only; see the `security` module docs.
    pub fn on_context_menu(&self) -> bool {
        security::suppress_context_menu(&self.config.local_hosts, &self.navigator.hostname())
    }

    /// Whether a keydown should be suppressed on this host.
    pub fn on_key_down(&self, key: &KeyPress) -> bool {
        security::suppress_key(&self.config.local_hosts, &self.navigator.hostname(), key)
    }

    /// Cancel the guard's timers.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.check_timer.take() {
            self.timers.clear_interval(id);
        }
        if let Some(id) = self.countdown_timer.take() {
            self.timers.clear_interval(id);
        }
    }

    fn decorate(&mut self) {
        ui::mount_logout_button(self.chrome.as_mut());

        // The countdown reads the record fresh so it captures any expiry the
        // validator just extended. Unreadable records are simply not shown.
        let now = self.clock.now_ms();
        if let Ok(record) = self.load_record(now) {
            if let Some(countdown) = Countdown::mount(self.chrome.as_mut(), record.expires, now) {
                self.countdown = Some(countdown);
                self.countdown_timer =
                    Some(self.timers.set_interval(self.config.check_interval_ms));
            }
        }
    }

    fn render_countdown(&mut self) {
        let now = self.clock.now_ms();
        let expired = match &self.countdown {
            Some(countdown) => !countdown.render(self.chrome.as_mut(), now),
            None => false,
        };
        if expired {
            self.logout();
        }
    }

    /// Load the Session Record and classify it against the validity
    /// invariant. Everything short of a valid record comes back as the
    /// matching [`GuardError`] variant.
    fn load_record(&self, now_ms: i64) -> Result<SessionRecord, GuardError> {
        let raw = self
            .storage
            .get(&self.config.session_key)
            .map_err(|e| GuardError::Storage(e.to_string()))?
            .ok_or(GuardError::MissingSession)?;
        let record: SessionRecord = serde_json::from_str(&raw)?;
        if !record.is_valid(now_ms) {
            return Err(GuardError::ExpiredSession);
        }
        Ok(record)
    }

    fn store_record(&mut self, record: &SessionRecord) {
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&self.config.session_key, &json) {
                    warn!(error = %e, "failed to persist renewed session");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize session record"),
        }
    }

    fn discard_record(&mut self) {
        if let Err(e) = self.storage.remove(&self.config.session_key) {
            warn!(error = %e, "failed to discard session record");
        }
    }
}
