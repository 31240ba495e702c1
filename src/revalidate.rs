//! Cache invalidation signals for dashboard views.
//!
//! After a successful mutation an action marks the view paths whose data may
//! now be stale. The rendering layer decides what to do with them.

use std::sync::Mutex;

pub const USERS_VIEW: &str = "/dashboard/users";
pub const ROOMS_VIEW: &str = "/dashboard/rooms";
pub const MEETINGS_VIEW: &str = "/dashboard/meetings";
pub const CALENDAR_VIEW: &str = "/dashboard/calendar";
pub const PROFILE_VIEW: &str = "/dashboard/profile";

pub fn room_edit_view(id: &str) -> String {
    format!("{}/{}/edit", ROOMS_VIEW, id)
}

pub fn meeting_edit_view(id: &str) -> String {
    format!("{}/{}/edit", MEETINGS_VIEW, id)
}

/// Receiver for "this path's data may be stale" markers
pub trait Revalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

/// Collects stale paths for a single request, without duplicates
#[derive(Debug, Default)]
pub struct StalePaths {
    paths: Mutex<Vec<String>>,
}

impl StalePaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths().iter().any(|p| p == path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths().is_empty()
    }
}

impl Revalidator for StalePaths {
    fn revalidate_path(&self, path: &str) {
        tracing::debug!("Marking {} as stale", path);
        let mut paths = self.paths.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }
}
