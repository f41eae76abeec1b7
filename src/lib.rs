//! Session guard for BrandKlout static report pages.
//!
//! The guard protects a set of static pages behind a time-limited session
//! token held in the host's persistent storage. On each page load it checks
//! whether a valid, unexpired session exists; if not it records the current
//! page and sends the browser to the auth page, and if so it opportunistically
//! extends the session and decorates the page with a logout button and a
//! session countdown.
//!
//! The browser pieces the original script leaned on (localStorage, the DOM,
//! `confirm`, `setInterval`) are trait seams here — see [`storage`] and
//! [`host`] — so a [`guard::SessionGuard`] is an ordinary object with an
//! explicit lifecycle: construct it, call [`guard::SessionGuard::init`],
//! forward timer ticks and UI events to it, and call
//! [`guard::SessionGuard::shutdown`] on teardown.
//!
//! A note on the [`security`] module: the context-menu and devtools-key
//! suppression it implements is a cosmetic deterrent and **not** a security
//! boundary. It does not stop anyone from reading storage, network traffic,
//! or the page source. Do not rely on it for confidentiality or integrity.

pub mod config;
pub mod error;
pub mod guard;
pub mod host;
pub mod redirect;
pub mod security;
pub mod session;
pub mod storage;
pub mod testing;
pub mod ui;

pub use config::GuardConfig;
pub use error::GuardError;
pub use guard::{GuardState, SessionGuard};
pub use session::SessionRecord;
