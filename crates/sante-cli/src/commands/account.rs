//! Device registration and sign-out.

use anyhow::Result;

use sante_core::gateway::BackendGateway;
use sante_core::session::CredentialStore;

use crate::app::AppContext;

pub async fn login(context: &AppContext, email: String) -> Result<()> {
    context.credentials.set_email(email.clone()).await?;
    context.gateway.register().await?;
    println!("Registered as {}.", email);

    let instructor = context.launch_instructor();
    instructor.onboarding_dismissed().await?;
    if context.initial_profile_submitter().is_needed().await? {
        println!("Next step: run `sante profile` to fill in your health profile.");
    }
    Ok(())
}

pub async fn logout(context: &AppContext) -> Result<()> {
    context.credentials.clear().await?;
    println!("Signed out; local credentials wiped.");
    Ok(())
}
