use anyhow::Result;
use tracing::info;

use crate::{domain::state::NotifyItem, ports::NotifierPort};

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

fn notification_title(item: &NotifyItem) -> String {
    format!("{} [{}]", item.repo_name, item.event_type)
}

fn notification_body(item: &NotifyItem) -> String {
    let issue_line = if item.issue.title.is_empty() {
        format!("#{}", item.issue.number)
    } else {
        format!("#{} {}", item.issue.number, item.issue.title)
    };
    format!("{issue_line}\n{}\n{}", item.reason, item.link)
}

#[derive(Debug, Clone, Copy)]
pub struct DesktopNotifier;

impl NotifierPort for DesktopNotifier {
    fn check_health(&self) -> Result<()> {
        platform::check_health()
    }

    fn render_badge_count(&self, unread: usize) -> Result<()> {
        // A terminal process has no badge surface; the count goes to the log
        // and the port seam stays for richer frontends.
        info!(unread, "unread notifications");
        Ok(())
    }

    fn show_notification(&self, item: &NotifyItem) -> Result<()> {
        platform::notify(&notification_title(item), &notification_body(item))
    }

    fn play_sound(&self) -> Result<()> {
        platform::play_sound()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NoopNotifier;

impl NotifierPort for NoopNotifier {
    fn check_health(&self) -> Result<()> {
        Ok(())
    }

    fn render_badge_count(&self, _unread: usize) -> Result<()> {
        Ok(())
    }

    fn show_notification(&self, _item: &NotifyItem) -> Result<()> {
        Ok(())
    }

    fn play_sound(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(target_os = "linux")]
mod platform {
    pub use super::linux::{check_health, notify, play_sound};
}

#[cfg(target_os = "macos")]
mod platform {
    pub use super::macos::{check_health, notify, play_sound};
}

#[cfg(target_os = "windows")]
mod platform {
    pub use super::windows::{check_health, notify, play_sound};
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
mod platform {
    use anyhow::Result;

    pub fn check_health() -> Result<()> {
        Ok(())
    }

    pub fn notify(_title: &str, _body: &str) -> Result<()> {
        Ok(())
    }

    pub fn play_sound() -> Result<()> {
        Ok(())
    }
}
