//! Read-eval-print loop.

use std::sync::Arc;

use kaiwa_core::{ChatRepository, InMemoryChatRepository};
use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    command::Command,
    config::ConsoleArgs,
    session::{Outcome, Session},
};

const PROMPT: &str = "kaiwa> ";

/// Run the console until `quit`, EOF or Ctrl-C.
pub async fn run_console(args: ConsoleArgs) -> Result<(), ReadlineError> {
    let repository: Arc<dyn ChatRepository> = Arc::new(InMemoryChatRepository::new());
    let mut session = Session::new(repository);
    let mut editor = DefaultEditor::new()?;

    if let Some(path) = &args.history {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!("No history loaded from {}: {}", path.display(), e);
        }
    }

    println!("Kaiwa console. Type 'help' for commands.");
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match session.execute(command).await {
            Ok(Outcome::Output(text)) => println!("{text}"),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                tracing::warn!("Command failed: {}", e);
                println!("Error: {e}");
            }
        }
    }

    if let Some(path) = &args.history {
        if let Err(e) = editor.save_history(path) {
            tracing::warn!("Failed to save history to {}: {}", path.display(), e);
        }
    }
    tracing::info!("Console closed");
    Ok(())
}
