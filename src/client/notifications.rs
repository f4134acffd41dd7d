//! Transient notifications ("toasts") shown by contact forms.
//!
//! A [`NotificationCenter`] is the single owner of notification state for a
//! page. Any number of forms may hold a clone of it, but only one
//! [`NotificationSurface`] can be mounted at a time; dropping the surface
//! releases it and discards whatever it was showing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Pending,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Pending,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

#[derive(Default)]
struct CenterState {
    mounted: bool,
    next_id: u64,
    active: Vec<(NotificationId, Notification)>,
}

#[derive(Clone, Default)]
pub struct NotificationCenter {
    state: Arc<Mutex<CenterState>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mount the surface, unless another one already is.
    pub fn acquire(&self) -> Option<NotificationSurface> {
        let mut state = self.lock();
        if state.mounted {
            return None;
        }
        state.mounted = true;
        Some(NotificationSurface {
            center: self.clone(),
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    /// Display `notification` on the mounted surface.
    ///
    /// Finished (success or failure) notifications make way for the new one.
    /// Returns `None` when no surface is mounted.
    pub fn show(&self, notification: Notification) -> Option<NotificationId> {
        let mut state = self.lock();
        if !state.mounted {
            return None;
        }
        state
            .active
            .retain(|(_, active)| active.kind == NotificationKind::Pending);
        let id = NotificationId(state.next_id);
        state.next_id += 1;
        state.active.push((id, notification));
        Some(id)
    }

    /// Swap the notification behind `id` in place.
    ///
    /// Returns `false` if `id` is gone, e.g. dismissed or its surface released.
    pub fn replace(&self, id: NotificationId, notification: Notification) -> bool {
        let mut state = self.lock();
        match state.active.iter_mut().find(|(active, _)| *active == id) {
            Some((_, slot)) => {
                *slot = notification;
                true
            }
            None => false,
        }
    }

    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut state = self.lock();
        let before = state.active.len();
        state.active.retain(|(active, _)| *active != id);
        state.active.len() != before
    }

    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.lock()
            .active
            .iter()
            .find(|(active, _)| *active == id)
            .map(|(_, notification)| notification.clone())
    }

    /// Snapshot, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock()
            .active
            .iter()
            .map(|(_, notification)| notification.clone())
            .collect()
    }
}

/// The mounted rendering surface. Released on drop.
pub struct NotificationSurface {
    center: NotificationCenter,
}

impl NotificationSurface {
    pub fn notifications(&self) -> Vec<Notification> {
        self.center.notifications()
    }
}

impl Drop for NotificationSurface {
    fn drop(&mut self) {
        let mut state = self.center.lock();
        state.mounted = false;
        state.active.clear();
    }
}
