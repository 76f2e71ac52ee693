//! Terminal-backed prompts
//!
//! Uses dialoguer when stdin is a terminal. Piped input is read one line at
//! a time straight from stdin so the tool can be scripted.

use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};
use vibe_init_core::Prompt;

pub struct TerminalPrompt {
    interactive: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        if self.interactive {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(io::Error::other);
        }

        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
