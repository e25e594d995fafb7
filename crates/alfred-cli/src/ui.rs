//! UI utilities for the CLI

use colored::*;
use crossterm::terminal::size;
use std::io::{self, Write};

use alfred_core::Result;

/// Display startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(60, terminal_width.saturating_sub(4)).max(50);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());

    let title = "Alfred - Gala Guest Assistant";
    println!(
        "{}{}{}",
        "│  ".blue(),
        title.blue().bold(),
        format!("{}│", " ".repeat(banner_width - title.len() - 4)).blue()
    );

    println!("{}", empty_line.blue());

    let feature_lines = [
        "Ask about any guest by name or relation",
        "",
        "'lookup <query>' shows the raw guest records",
    ];

    for line in feature_lines {
        if line.is_empty() {
            println!("{}", empty_line.blue());
        } else {
            let content = format!(
                "│  {}{}│",
                line,
                " ".repeat(banner_width.saturating_sub(line.chars().count() + 4))
            );
            println!("{}", content.blue());
        }
    }

    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();
    println!(
        "{}",
        "💡 Tip: Type your question in natural language, or 'help' for commands".dimmed()
    );
    println!();
}

pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Ask Alfred about the gala guests", "question".green());
    println!("  {} - Run the guest lookup tool directly", "lookup <query>".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  Who is Ada Lovelace?");
    println!("  Which of my guests is an old friend from university?");
    println!("  lookup Marie Curie");
}

/// Prompt and read one line, `None` at end of input
pub fn read_input(prompt: &str) -> Result<Option<String>> {
    print!("{} ", prompt.cyan().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}
