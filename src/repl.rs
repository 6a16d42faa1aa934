//! Interactive prompt loop.
//!
//! One line per turn. `exit`/`quit` (any case) and EOF terminate, blank
//! input is ignored, everything else is forwarded to the agent. A failed
//! turn is reported and the session continues with its transcript intact.

use std::io::{BufRead, Write};

use crate::agent::{Agent, Session};

/// What to do with one line of user input.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Exit,
    Skip,
    Turn(&'a str),
}

fn parse_input(line: &str) -> ReplCommand<'_> {
    let input = line.trim();
    if input.is_empty() {
        ReplCommand::Skip
    } else if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
        ReplCommand::Exit
    } else {
        ReplCommand::Turn(input)
    }
}

/// Run the prompt loop until the user exits or stdin closes.
pub async fn run(agent: &Agent, session: &mut Session, model: &str) -> anyhow::Result<()> {
    println!("{}", "=".repeat(60));
    println!("Local AI Agent");
    println!("{}", "=".repeat(60));
    println!("Using model: {}", model);
    println!("Type 'exit' or 'quit' to end the conversation");
    println!("{}", "=".repeat(60));
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\nGoodbye!");
            return Ok(());
        }

        match parse_input(&line) {
            ReplCommand::Skip => continue,
            ReplCommand::Exit => {
                println!("Goodbye!");
                return Ok(());
            }
            ReplCommand::Turn(input) => match agent.run_turn(session, input).await {
                Ok(answer) => println!("\nAssistant: {}\n", answer),
                Err(e) => {
                    tracing::warn!("turn failed: {}", e);
                    println!("\nError: {}\n", e);
                }
            },
        }
    }
}
