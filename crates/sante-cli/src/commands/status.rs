//! Profile and history display.

use anyhow::Result;

use sante_application::LaunchDestination;

use crate::app::AppContext;

pub async fn run(context: &AppContext) -> Result<()> {
    match context.launch_instructor().configure().await? {
        LaunchDestination::Onboarding | LaunchDestination::Login => {
            println!("Not signed in. Run `sante login <email>` first.");
            return Ok(());
        }
        LaunchDestination::InitialProfile => {
            println!("Signed in, but your health profile is not filled in yet.");
            println!("Run `sante profile` to complete it.");
            return Ok(());
        }
        LaunchDestination::Main => {}
    }

    let Some(user) = context.profile_usecase().load_user().await? else {
        println!("Not signed in.");
        return Ok(());
    };

    println!("{} {}", user.profile.firstname, user.profile.name);
    if let Some(birthdate) = user.profile.birthdate {
        println!("  born {}", birthdate);
    }
    if let Some(postal_code) = &user.profile.postal_code {
        println!("  area {}", postal_code);
    }

    if user.profile.history.is_empty() {
        println!("No reports yet - run `sante checkin`.");
        return Ok(());
    }

    println!("Reports ({}):", user.profile.history.len());
    for record in user.profile.history.iter().rev() {
        let symptoms: Vec<&str> = record
            .values
            .iter()
            .filter(|metric| metric.value)
            .map(|metric| metric.kind.wire_key())
            .collect();
        let when = record
            .recorded_at
            .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "(undated)".to_string());
        if symptoms.is_empty() {
            println!("  {} - feeling fine", when);
        } else {
            println!("  {} - {}", when, symptoms.join(", "));
        }
    }

    if !user.shared_users.is_empty() {
        println!("Friends sharing with you: {}", user.shared_users.len());
    }
    Ok(())
}
