//! Prompter selection for the installer.
//!
//! A real terminal gets `dialoguer` prompts (with the `interactive`
//! feature); anything else, such as a pipe or `/dev/null`, gets plain line
//! prompts where an empty answer means the default.

#[cfg(feature = "interactive")]
use std::io::{self, IsTerminal};

use craft_adapters::LinePrompter;
use craft_core::application::ports::Prompter;

/// The prompter for this process's stdin.
pub fn terminal_prompter(no_color: bool) -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        return Box::new(interactive::DialoguerPrompter::new(no_color));
    }

    #[cfg(not(feature = "interactive"))]
    let _ = no_color;
    Box::new(LinePrompter::stdio())
}

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{
        Confirm, Input,
        theme::{ColorfulTheme, SimpleTheme, Theme},
    };

    use craft_core::{
        application::{ApplicationError, ports::Prompter},
        error::CraftResult,
    };

    pub struct DialoguerPrompter {
        theme: Box<dyn Theme + Send + Sync>,
    }

    impl DialoguerPrompter {
        pub fn new(no_color: bool) -> Self {
            let theme: Box<dyn Theme + Send + Sync> = if no_color {
                Box::new(SimpleTheme)
            } else {
                Box::new(ColorfulTheme::default())
            };
            Self { theme }
        }
    }

    fn prompt_failed(e: dialoguer::Error) -> ApplicationError {
        ApplicationError::PromptFailed {
            reason: e.to_string(),
        }
    }

    impl Prompter for DialoguerPrompter {
        fn ask(&self, question: &str, default: &str) -> CraftResult<String> {
            let answer: String = Input::with_theme(self.theme.as_ref())
                .with_prompt(question)
                .default(default.to_string())
                .interact_text()
                .map_err(prompt_failed)?;
            Ok(answer.trim().to_string())
        }

        fn confirm(&self, question: &str, default: bool) -> CraftResult<bool> {
            let answer = Confirm::with_theme(self.theme.as_ref())
                .with_prompt(question)
                .default(default)
                .interact()
                .map_err(prompt_failed)?;
            Ok(answer)
        }
    }
}
