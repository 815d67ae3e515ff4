use anyhow::Result;
use winrt_notification::{Sound, Toast};

pub fn check_health() -> Result<()> {
    Ok(())
}

pub fn notify(title: &str, body: &str) -> Result<()> {
    Toast::new(Toast::POWERSHELL_APP_ID)
        .title(title)
        .text1(body)
        .sound(None)
        .show()?;
    Ok(())
}

pub fn play_sound() -> Result<()> {
    Toast::new(Toast::POWERSHELL_APP_ID)
        .sound(Some(Sound::Default))
        .show()?;
    Ok(())
}
