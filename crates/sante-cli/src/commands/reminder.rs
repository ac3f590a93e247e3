//! Daily reminder configuration.

use anyhow::{bail, Result};
use chrono::NaiveTime;

use crate::app::AppContext;

pub async fn run(context: &AppContext, time: &str) -> Result<()> {
    let settings = context.reminder_settings();

    if time.eq_ignore_ascii_case("off") {
        settings.clear_reminder().await?;
        println!("Daily reminder cleared.");
        return Ok(());
    }

    let Ok(hour) = NaiveTime::parse_from_str(time, "%H:%M") else {
        bail!("expected a time like 09:30, or 'off'");
    };
    settings.set_reminder(hour).await?;
    println!("Daily reminder set to {}.", hour.format("%H:%M"));
    Ok(())
}
