use colored::*;
use std::io::{self, Write};

use crate::text::quoted_list;

const SEPARATOR_WIDTH: usize = 40;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub(super) fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=== NLP Question-and-Answering System (CLI) ===".bright_cyan().bold())?;
    writeln!(out, "Type '{}' or '{}' to stop.", "exit".green(), "quit".green())?;
    writeln!(out, "{}", separator().bright_black())
}

pub(super) fn print_tokens<W: Write>(out: &mut W, tokens: &[String]) -> io::Result<()> {
    let line = format!("[Debug] Tokens: {}", quoted_list(tokens));
    writeln!(out, "{}", line.bright_black())
}

pub(super) fn print_answer<W: Write>(out: &mut W, answer: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "Answer:".yellow().bold())?;
    writeln!(out, "{}", answer)?;
    writeln!(out, "{}", separator().bright_black())?;
    out.flush()
}
