use std::io;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Confirm, Input};

use crate::error::Error;

/// Everything the navigator does with the operator's terminal.
pub trait Console {
    fn clear(&mut self) -> Result<(), Error>;

    fn line(&mut self, text: &str);

    /// Reads one line of free text. May be empty.
    fn read_line(&mut self, prompt: &str) -> Result<String, Error>;

    fn confirm(&mut self, prompt: &str) -> Result<bool, Error>;
}

/// The real terminal: crossterm for the screen, dialoguer for input.
#[derive(Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn clear(&mut self) -> Result<(), Error> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, Error> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, Error> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}
