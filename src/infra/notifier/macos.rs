use anyhow::{Context, Result};

pub fn check_health() -> Result<()> {
    Ok(())
}

pub fn notify(title: &str, body: &str) -> Result<()> {
    mac_notification_sys::send_notification(title, None, body, None)?;
    Ok(())
}

pub fn play_sound() -> Result<()> {
    std::process::Command::new("afplay")
        .arg("/System/Library/Sounds/Ping.aiff")
        .spawn()
        .context("failed to start afplay")?;
    Ok(())
}
