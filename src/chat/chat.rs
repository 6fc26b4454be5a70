use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn, error};

use crate::llm::{AnswerClient, AnswerError};
use crate::text::Normalizer;
use super::display::{print_answer, print_banner, print_tokens};

/// Instruction placed in front of every CLI question
pub const PROMPT_TEMPLATE_PREFIX: &str = "Answer the following question concisely: ";

const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];
const INPUT_PROMPT: &str = "\nEnter your question: ";

/// What a single line of input asks the loop to do
#[derive(Debug, PartialEq, Eq)]
pub enum LineCommand<'a> {
    Exit,
    Skip,
    Ask(&'a str),
}

/// Source of input lines for the chat loop
pub trait LineReader {
    /// Returns the next line, or `None` once input is closed.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn add_history(&mut self, _line: &str) {}
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.readline(prompt) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                error!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.add_history_entry(line);
    }
}

/// Classifies a raw input line
pub fn parse_line(line: &str) -> LineCommand<'_> {
    let trimmed = line.trim();
    if EXIT_COMMANDS.contains(&trimmed.to_lowercase().as_str()) {
        LineCommand::Exit
    } else if trimmed.is_empty() {
        LineCommand::Skip
    } else {
        LineCommand::Ask(line)
    }
}

/// Wraps the raw question in the CLI's instruction template
pub fn build_prompt(question: &str) -> String {
    format!("{}{}", PROMPT_TEMPLATE_PREFIX, question)
}

/// Text shown for an answer, with failures rendered inline
pub fn render_answer(result: Result<String, AnswerError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => format!("Error communicating with LLM: {}", e),
    }
}

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Waiting for the model...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Runs the question loop until an exit keyword or end of input.
///
/// Each turn is independent: nothing is carried between questions.
pub async fn run_session<R, W>(
    reader: &mut R,
    out: &mut W,
    normalizer: &Normalizer,
    client: &dyn AnswerClient,
) -> io::Result<()>
where
    R: LineReader,
    W: Write,
{
    print_banner(out)?;

    loop {
        out.flush()?;
        let Some(line) = reader.read_line(INPUT_PROMPT) else {
            writeln!(out, "Exiting...")?;
            break;
        };

        let question = match parse_line(&line) {
            LineCommand::Exit => {
                writeln!(out, "Exiting...")?;
                break;
            }
            LineCommand::Skip => continue,
            LineCommand::Ask(question) => question,
        };
        reader.add_history(line.trim());

        writeln!(out, "{}", "Processing...".cyan())?;
        let normalized = normalizer.normalize(question);
        print_tokens(out, &normalized.tokens)?;

        let prompt = build_prompt(question);
        info!("Sending prompt: '{}'", prompt);

        let spinner = spinner();
        let result = client.answer(&prompt).await;
        spinner.finish_and_clear();

        if let Err(e) = &result {
            warn!("Answer failed: {}", e);
        }
        print_answer(out, &render_answer(result))?;
    }

    Ok(())
}

/// Interactive terminal session on stdin/stdout
pub async fn chat_loop(
    normalizer: &Normalizer,
    client: &dyn AnswerClient,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("Starting chat session");
    let mut rl = DefaultEditor::new()?;
    let mut stdout = io::stdout();
    run_session(&mut rl, &mut stdout, normalizer, client).await?;
    info!("Chat session ended");
    Ok(())
}
