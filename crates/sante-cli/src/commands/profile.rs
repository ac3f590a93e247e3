//! The button-style adapter for the initial profile questionnaire.

use anyhow::Result;

use sante_core::catalog::{Catalog, Question};
use sante_core::flow::{FlowController, FlowInput, FlowProgress};

use crate::app::AppContext;
use crate::prompt::read_line;

pub async fn run(context: &AppContext) -> Result<()> {
    let submitter = context.initial_profile_submitter();
    if !submitter.is_needed().await? {
        println!("Your health profile is already filled in.");
        return Ok(());
    }

    let catalog = Catalog::initial_profile();
    let total = catalog.len();
    let mut flow = FlowController::new(catalog);

    println!(
        "Health profile - {} questions. Answer with the number of your choice, 'q' to stop.",
        total
    );

    let mut question = flow.start()?.clone();
    let mut position = 1;
    loop {
        println!();
        println!("[{}/{}] {}", position, total, question.prompt());

        let Some(input) = ask(&question)? else {
            flow.cancel()?;
            println!("Questionnaire cancelled; nothing was sent.");
            return Ok(());
        };

        match flow.submit_answer(input) {
            Ok(FlowProgress::Next(next)) => {
                question = next.clone();
                position += 1;
            }
            Ok(FlowProgress::Completed) => break,
            Err(err) if err.is_invalid_answer() => {
                // unreachable through this adapter's prompts; re-ask
                println!("That answer is not available here, try again.");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let answers = flow.take_answers()?;
    println!();
    println!("Sending your answers...");
    let user = submitter.submit(&answers).await?;
    println!(
        "Profile saved for {} {}.",
        user.profile.firstname, user.profile.name
    );
    Ok(())
}

/// Asks one question; `None` means the user wants out.
fn ask(question: &Question) -> Result<Option<FlowInput>> {
    if let Some(range) = question.numeric() {
        loop {
            let prompt = format!(
                "Enter a value between {} and {} {} (default {}):",
                range.min(),
                range.max(),
                range.unit(),
                range.default_value()
            );
            let Some(line) = read_line(&prompt)? else {
                return Ok(None);
            };
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            let value = if line.is_empty() {
                range.default_value()
            } else {
                match line.parse::<i64>() {
                    Ok(value) => value,
                    Err(_) => {
                        println!("Not a number.");
                        continue;
                    }
                }
            };
            if value < range.min() || value > range.max() {
                println!("Out of range.");
                continue;
            }
            // the picker submits an index, not the value itself
            return Ok(Some(FlowInput::Picker {
                index: (value - range.min()) as usize,
            }));
        }
    }

    loop {
        for (number, choice) in question.buttons().iter().enumerate() {
            println!("  {}. {}", number + 1, choice.label());
        }
        let Some(line) = read_line("Your choice:")? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(number) if number >= 1 && number <= question.buttons().len() => {
                return Ok(Some(FlowInput::Choice(question.buttons()[number - 1])));
            }
            _ => println!("Pick a number between 1 and {}.", question.buttons().len()),
        }
    }
}
