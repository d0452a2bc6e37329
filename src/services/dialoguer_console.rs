use dialoguer::{Input, Password};

use crate::domain::AppError;
use crate::ports::Console;

/// Interactive console rendered with dialoguer prompts.
#[derive(Debug, Clone, Default)]
pub struct DialoguerConsole;

impl DialoguerConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for DialoguerConsole {
    fn show_step(&self, instructions: &[String], help: &[String]) {
        println!();
        for line in instructions {
            println!("{line}");
        }
        if !help.is_empty() {
            println!();
            println!("Commentary:");
            for line in help {
                println!("  {line}");
            }
        }
    }

    fn show_error(&self, error: &str) {
        eprintln!("{error}");
    }

    fn show_message(&self, text: &str) {
        println!("{text}");
    }

    fn read_line(&self, prompt: &str) -> Result<String, AppError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::Console(e.to_string()))
    }

    fn read_secret(&self, prompt: &str) -> Result<String, AppError> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| AppError::Console(e.to_string()))
    }
}
