use anyhow::{Context, Result};

pub fn check_health() -> Result<()> {
    Ok(())
}

pub fn notify(title: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(title)
        .body(body)
        .show()?;
    Ok(())
}

pub fn play_sound() -> Result<()> {
    std::process::Command::new("canberra-gtk-play")
        .args(["-i", "message-new-instant"])
        .spawn()
        .context("failed to start canberra-gtk-play")?;
    Ok(())
}
