//! Transient notifications and confirmation prompts.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast shown to the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    created: Instant,
}

/// Queue of toasts, newest last.
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    const MAX: usize = 20;

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.items.push(Notice {
            level,
            message: message.into(),
            timestamp: Local::now(),
            created: Instant::now(),
        });

        if self.items.len() > Self::MAX {
            self.items.remove(0);
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Drop notices older than `ttl`.
    pub fn expire(&mut self, ttl: Duration) {
        self.items.retain(|n| n.created.elapsed() < ttl);
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Move every notice from `other` into this queue.
    pub fn absorb(&mut self, other: &mut Notices) {
        for notice in other.items.drain(..) {
            self.items.push(notice);
        }
        if self.items.len() > Self::MAX {
            let excess = self.items.len() - Self::MAX;
            self.items.drain(..excess);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notice> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// User's answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Cancel,
}

/// A pending yes/no question carrying the data the confirmed action needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest<T> {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub payload: T,
}
