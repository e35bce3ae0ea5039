//! Transient status-bar messages

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Ordered by priority: a higher kind replaces a lower one on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToastKind {
    Success,
    Warning,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Warning => "⚠",
        }
    }

    fn lifetime(self) -> Duration {
        match self {
            ToastKind::Success => Duration::from_secs(3),
            ToastKind::Warning => Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Set the first time the toast reaches the screen
    expires_at: Option<Instant>,
}

impl Toast {
    fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    fn show(&mut self, now: Instant) {
        self.expires_at.get_or_insert(now + self.kind.lifetime());
    }

    fn expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// One visible toast plus a FIFO of toasts waiting their turn
#[derive(Debug, Default)]
pub struct ToastQueue {
    visible: Option<Toast>,
    waiting: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        self.push_at(toast, Instant::now());
    }

    fn push_at(&mut self, mut toast: Toast, now: Instant) {
        let outranks = self
            .visible
            .as_ref()
            .map_or(true, |visible| toast.kind > visible.kind);
        if outranks {
            toast.show(now);
            self.visible = Some(toast);
        } else {
            self.waiting.push_back(toast);
        }
    }

    /// Drop the visible toast once expired and bring up the next one
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if self.visible.as_ref().is_some_and(|toast| toast.expired(now)) {
            self.visible = None;
        }
        if self.visible.is_none() {
            self.visible = self.waiting.pop_front().map(|mut toast| {
                toast.show(now);
                toast
            });
        }
    }

    pub fn dismiss(&mut self) {
        self.visible = None;
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.visible.as_ref()
    }
}
