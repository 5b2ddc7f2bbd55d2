//! Terminal implementations of the [`Prompter`] port.
//!
//! - [`TerminalPrompter`]: dialoguer widgets, used when stdin is a TTY.
//! - [`LinePrompter`]: plain line-oriented questions over any reader and
//!   writer, used when input is piped and in tests.
//!
//! Both report end of input and Ctrl-C as [`PromptError::Aborted`].

use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::Mutex;

use archgen_core::application::{PromptError, ports::Prompter};

// ── dialoguer ─────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "interactive")]
mod terminal {
    use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
    use dialoguer::{Confirm, Input, MultiSelect, Select};

    use super::*;

    /// Interactive prompts drawn with dialoguer on stderr.
    #[derive(Debug, Clone, Copy)]
    pub struct TerminalPrompter {
        colored: bool,
    }

    impl TerminalPrompter {
        pub fn new(colored: bool) -> Self {
            Self { colored }
        }

        fn theme(&self) -> Box<dyn Theme> {
            if self.colored {
                Box::new(ColorfulTheme::default())
            } else {
                Box::new(SimpleTheme)
            }
        }
    }

    fn prompt_error(err: dialoguer::Error) -> PromptError {
        match err {
            dialoguer::Error::IO(io) => PromptError::from(io),
        }
    }

    impl Prompter for TerminalPrompter {
        fn prompt(&self, message: &str, default: &str) -> Result<String, PromptError> {
            let theme = self.theme();
            let mut input = Input::<String>::with_theme(theme.as_ref())
                .with_prompt(message)
                .allow_empty(true);
            if !default.is_empty() {
                input = input.default(default.to_string());
            }
            input.interact_text().map_err(prompt_error)
        }

        fn confirm(&self, message: &str) -> Result<bool, PromptError> {
            let theme = self.theme();
            Confirm::with_theme(theme.as_ref())
                .with_prompt(message.trim_end())
                .default(true)
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(PromptError::Aborted)
        }

        fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError> {
            let theme = self.theme();
            Select::with_theme(theme.as_ref())
                .with_prompt(message)
                .items(items)
                .default(0)
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(PromptError::Aborted)
        }

        fn multi_select(
            &self,
            message: &str,
            items: &[String],
        ) -> Result<Vec<usize>, PromptError> {
            let theme = self.theme();
            MultiSelect::with_theme(theme.as_ref())
                .with_prompt(message)
                .items(items)
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(PromptError::Aborted)
        }
    }
}

// ── line-oriented ─────────────────────────────────────────────────────────────

/// Questions written to `W`, answers read line by line from `R`.
pub struct LinePrompter<R, W> {
    io: Mutex<(R, W)>,
}

impl LinePrompter<BufReader<Stdin>, Stderr> {
    /// Read stdin, write questions to stderr so stdout stays clean.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead + Send, W: Write + Send> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Print `question` and read one answer without its line ending.
    fn ask(&self, question: &str) -> Result<String, PromptError> {
        let mut guard = self
            .io
            .lock()
            .map_err(|_| PromptError::Io("prompt lock poisoned".into()))?;
        let (reader, writer) = &mut *guard;

        write!(writer, "{question}")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            return Err(PromptError::Aborted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&self, text: &str) -> Result<(), PromptError> {
        let mut guard = self
            .io
            .lock()
            .map_err(|_| PromptError::Io("prompt lock poisoned".into()))?;
        writeln!(guard.1, "{text}")?;
        Ok(())
    }

    fn numbered(&self, message: &str, items: &[String]) -> Result<(), PromptError> {
        let mut text = format!("{message}:");
        for (i, item) in items.iter().enumerate() {
            text.push_str(&format!("\n  {}: {item}", i + 1));
        }
        self.say(&text)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (R, W) {
        match self.io.into_inner() {
            Ok(io) => io,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> Prompter for LinePrompter<R, W> {
    fn prompt(&self, message: &str, default: &str) -> Result<String, PromptError> {
        if default.is_empty() {
            self.ask(&format!("{message}: "))
        } else {
            self.ask(&format!("{message} [{default}]: "))
        }
    }

    fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        let question = format!("{}\nY: ", message.trim_end());
        loop {
            match self.ask(&question)?.trim().to_ascii_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer 'y' or 'n'.")?,
            }
        }
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        if items.is_empty() {
            return Err(PromptError::Io("nothing to choose from".into()));
        }
        self.numbered(message, items)?;
        loop {
            let answer = self.ask(&format!("Choose a number (1-{}) [1]: ", items.len()))?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(0);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(n - 1),
                _ => self.say(&format!("'{answer}' is not a valid choice."))?,
            }
        }
    }

    fn multi_select(&self, message: &str, items: &[String]) -> Result<Vec<usize>, PromptError> {
        self.numbered(message, items)?;
        'ask: loop {
            let answer = self.ask("Numbers separated by spaces or commas (empty for none): ")?;
            let mut chosen = Vec::new();
            for token in answer.split([',', ' ']).filter(|t| !t.trim().is_empty()) {
                match token.trim().parse::<usize>() {
                    Ok(n) if (1..=items.len()).contains(&n) => {
                        if !chosen.contains(&(n - 1)) {
                            chosen.push(n - 1);
                        }
                    }
                    _ => {
                        self.say(&format!("'{}' is not a valid choice.", token.trim()))?;
                        continue 'ask;
                    }
                }
            }
            return Ok(chosen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(p: LinePrompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_inner().1).unwrap()
    }

    #[test]
    fn prompt_shows_default_and_strips_line_ending() {
        let p = prompter("com.acme\r\n");
        assert_eq!(
            p.prompt("Define value for property 'groupId'", "com.example").unwrap(),
            "com.acme"
        );
        assert_eq!(written(p), "Define value for property 'groupId' [com.example]: ");
    }

    #[test]
    fn empty_line_is_returned_as_is() {
        let p = prompter("\n");
        assert_eq!(p.prompt("q", "d").unwrap(), "");
    }

    #[test]
    fn end_of_input_aborts() {
        let p = prompter("");
        assert_eq!(p.prompt("q", "").unwrap_err(), PromptError::Aborted);
        assert_eq!(p.confirm("ok?").unwrap_err(), PromptError::Aborted);
    }

    #[test]
    fn confirm_defaults_to_yes_and_reasks_on_nonsense() {
        assert!(prompter("\n").confirm("ok?").unwrap());
        assert!(!prompter("maybe\nN\n").confirm("ok?").unwrap());

        let p = prompter("what\nyes\n");
        assert!(p.confirm("ok?").unwrap());
        assert!(written(p).contains("Please answer 'y' or 'n'."));
    }

    #[test]
    fn select_is_one_based_with_first_as_default() {
        let items = vec!["quickstart".to_string(), "webapp".to_string()];
        assert_eq!(prompter("2\n").select("Choose", &items).unwrap(), 1);
        assert_eq!(prompter("\n").select("Choose", &items).unwrap(), 0);
        assert_eq!(prompter("0\n9\n1\n").select("Choose", &items).unwrap(), 0);
    }

    #[test]
    fn select_lists_items() {
        let items = vec!["quickstart".to_string(), "webapp".to_string()];
        let p = prompter("1\n");
        p.select("Choose an archetype", &items).unwrap();
        let out = written(p);
        assert!(out.contains("  1: quickstart\n  2: webapp"));
    }

    #[test]
    fn multi_select_accepts_mixed_separators_and_dedups() {
        let items: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(prompter("3, 1 3\n").multi_select("Edit", &items).unwrap(), vec![2, 0]);
        assert_eq!(prompter("\n").multi_select("Edit", &items).unwrap(), Vec::<usize>::new());
        assert_eq!(prompter("x\n2\n").multi_select("Edit", &items).unwrap(), vec![1]);
    }
}
