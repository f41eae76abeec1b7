//! Deterministic host doubles.
//!
//! Everything here shares state between clones through `Rc`, so a harness
//! keeps one clone for seeding and assertions while the guard owns the other.
//! The same doubles work for embedders that want to drive a guard without a
//! real page, e.g. smoke-checking a deployment's config.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::host::{Clock, Navigator, PageChrome, TimerId, Timers, Widget};

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn at(now_ms: i64) -> Self {
        let clock = Self::default();
        clock.set(now_ms);
        clock
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

/// Navigator pinned to one location; navigations are recorded, not followed.
#[derive(Debug, Clone)]
pub struct FixedNavigator {
    path: String,
    hostname: String,
    visited: Rc<RefCell<Vec<String>>>,
}

impl FixedNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            hostname: "localhost".to_string(),
            visited: Rc::default(),
        }
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for FixedNavigator {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn navigate(&mut self, target: &str) {
        self.visited.borrow_mut().push(target.to_string());
    }
}

#[derive(Debug, Default)]
struct ChromeState {
    widgets: BTreeMap<String, Widget>,
    mounts: BTreeMap<String, usize>,
    prompts: Vec<String>,
}

/// In-memory page chrome recording mounts, text updates, and confirms.
#[derive(Debug, Clone)]
pub struct FakeChrome {
    ready: Rc<Cell<bool>>,
    confirm_answer: Rc<Cell<bool>>,
    state: Rc<RefCell<ChromeState>>,
}

impl FakeChrome {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: Rc::new(Cell::new(ready)),
            confirm_answer: Rc::new(Cell::new(true)),
            state: Rc::default(),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    /// Answer every confirm dialog with `answer` from now on.
    pub fn answer_confirms(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn has(&self, id: &str) -> bool {
        self.state.borrow().widgets.contains_key(id)
    }

    pub fn widget(&self, id: &str) -> Option<Widget> {
        self.state.borrow().widgets.get(id).cloned()
    }

    pub fn text_of(&self, id: &str) -> Option<String> {
        self.state.borrow().widgets.get(id).map(|w| w.text.clone())
    }

    /// How many times an element with this id has been mounted.
    pub fn mount_count(&self, id: &str) -> usize {
        self.state.borrow().mounts.get(id).copied().unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state.borrow().prompts.clone()
    }
}

impl PageChrome for FakeChrome {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn has_element(&self, id: &str) -> bool {
        self.has(id)
    }

    fn mount(&mut self, widget: Widget) {
        let mut state = self.state.borrow_mut();
        *state.mounts.entry(widget.id.clone()).or_insert(0) += 1;
        state.widgets.insert(widget.id.clone(), widget);
    }

    fn update_text(&mut self, id: &str, text: &str) {
        if let Some(widget) = self.state.borrow_mut().widgets.get_mut(id) {
            widget.text = text.to_string();
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.state.borrow_mut().prompts.push(prompt.to_string());
        self.confirm_answer.get()
    }
}

/// Timer registry with no clock behind it; the harness fires ticks itself
/// by passing the registered ids to `SessionGuard::fire`.
#[derive(Debug, Clone, Default)]
pub struct ManualTimers {
    next_id: Rc<Cell<u64>>,
    active: Rc<RefCell<BTreeMap<TimerId, i64>>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_ids(&self) -> Vec<TimerId> {
        self.active.borrow().keys().copied().collect()
    }

    pub fn period_of(&self, id: TimerId) -> Option<i64> {
        self.active.borrow().get(&id).copied()
    }
}

impl Timers for ManualTimers {
    fn set_interval(&mut self, period_ms: i64) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.active.borrow_mut().insert(id, period_ms);
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.active.borrow_mut().remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at(100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);
    }

    #[test]
    fn test_fixed_navigator_records_navigations() {
        let shared = FixedNavigator::at("/index.html");
        let mut nav = shared.clone();
        nav.navigate("auth.html");
        assert_eq!(shared.visited(), vec!["auth.html".to_string()]);
    }

    #[test]
    fn test_manual_timers_register_and_clear() {
        let shared = ManualTimers::new();
        let mut timers = shared.clone();
        let a = timers.set_interval(60_000);
        let b = timers.set_interval(60_000);
        assert_ne!(a, b);
        assert_eq!(shared.active_ids().len(), 2);

        timers.clear_interval(a);
        assert_eq!(shared.active_ids(), vec![b]);
        assert_eq!(shared.period_of(b), Some(60_000));
    }
}
