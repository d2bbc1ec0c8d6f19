//! Host document side effects
//!
//! The presentation layer owns the page; the controller only asks it to lock
//! background scrolling, scroll to the top, or show a blocking alert.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use parking_lot::Mutex;

/// Side effects the controller requests from the hosting page.
pub trait HostDocument: Send + Sync {
    /// Assert or release the background scroll lock.
    fn set_scroll_lock(&self, locked: bool);

    /// Smooth scroll to the top of the page.
    fn scroll_to_top(&self);

    /// Show a one-time message to the user.
    fn alert(&self, message: &str);
}

/// Host that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl HostDocument for NoopHost {
    fn set_scroll_lock(&self, _locked: bool) {}

    fn scroll_to_top(&self) {}

    fn alert(&self, _message: &str) {}
}

/// A side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    ScrollLock(bool),
    ScrollToTop,
    Alert(String),
}

/// Host that records every request in order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Current lock state: the last lock request wins, unlocked if none.
    pub fn scroll_locked(&self) -> bool {
        self.events
            .lock()
            .iter()
            .rev()
            .find_map(|event| match event {
                HostEvent::ScrollLock(locked) => Some(*locked),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn scroll_to_top_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, HostEvent::ScrollToTop))
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl HostDocument for RecordingHost {
    fn set_scroll_lock(&self, locked: bool) {
        self.events.lock().push(HostEvent::ScrollLock(locked));
    }

    fn scroll_to_top(&self) {
        self.events.lock().push(HostEvent::ScrollToTop);
    }

    fn alert(&self, message: &str) {
        self.events.lock().push(HostEvent::Alert(message.to_string()));
    }
}
