//! The swipe-style adapter for the daily check-in.
//!
//! `y`/`n` stand in for right and left swipes, `u` for the rewind button.

use anyhow::Result;

use sante_core::catalog::Catalog;
use sante_core::flow::{FlowController, FlowProgress, SwipeDirection};

use crate::app::AppContext;
use crate::prompt::read_line;

pub async fn run(context: &AppContext) -> Result<()> {
    let pipeline = context.daily_report_pipeline()?;

    // reports parked by earlier failed runs go out first
    match pipeline.flush_pending().await {
        Ok(0) => {}
        Ok(sent) => println!("Delivered {} report(s) from earlier check-ins.", sent),
        Err(err) => tracing::warn!(%err, "pending reports still undeliverable"),
    }

    let catalog = Catalog::daily_metrics();
    let total = catalog.len();
    let mut flow = FlowController::with_undo(catalog);

    println!("Daily check-in - answer y (yes), n (no), u (undo last), q (stop).");

    let mut question = flow.start()?.clone();
    loop {
        let answered = flow.answers().len();
        println!();
        println!("[{}/{}] {}", answered + 1, total, question.prompt());

        let Some(line) = read_line("y/n/u/q:")? else {
            flow.cancel()?;
            println!("Check-in cancelled; nothing was sent.");
            return Ok(());
        };

        let progress = match line.to_ascii_lowercase().as_str() {
            "y" | "yes" => flow.submit_answer(SwipeDirection::Right.as_input())?,
            "n" | "no" => flow.submit_answer(SwipeDirection::Left.as_input())?,
            "u" => {
                match flow.undo_last()? {
                    Some(previous) => question = previous.clone(),
                    None => println!("Nothing to undo yet."),
                }
                continue;
            }
            "q" => {
                flow.cancel()?;
                println!("Check-in cancelled; nothing was sent.");
                return Ok(());
            }
            _ => {
                println!("Please answer y, n, u or q.");
                continue;
            }
        };

        match progress {
            FlowProgress::Next(next) => question = next.clone(),
            FlowProgress::Completed => break,
        }
    }

    let answers = flow.take_answers()?;
    println!();
    println!("Sending today's report...");
    let user = pipeline.submit(&answers).await?;
    println!(
        "Thanks {} - {} report(s) on record.",
        user.profile.firstname,
        user.profile.history.len()
    );
    Ok(())
}
