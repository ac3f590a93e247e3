//! Friend list commands.

use anyhow::Result;

use crate::app::AppContext;

pub async fn list(context: &AppContext) -> Result<()> {
    let friends = context.friends_usecase().list().await;
    if friends.is_empty() {
        println!("No friends are sharing their reports with you.");
        return Ok(());
    }
    for friend in friends {
        println!("  {:>4}  {} {}", friend.id, friend.firstname, friend.name);
    }
    Ok(())
}

pub async fn remove(context: &AppContext, id: i64) -> Result<()> {
    context.friends_usecase().remove(id).await?;
    println!("Friend {} removed.", id);
    Ok(())
}
