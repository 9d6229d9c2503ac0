//! Yes/no feedback after an answer

use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

pub const HELPFUL_QUESTION: &str = "Was this explanation helpful? [y/n]";
pub const BETTER_QUESTION: &str = "Is this better now? [y/n]";
pub const REWORD_ADVICE: &str = "Sorry. Please try rewording your question for a clearer explanation.";
pub const THANKS: &str = "Glad it helped!";

/// Interpret a typed answer. `None` means ask again.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask until a yes/no answer arrives. End of input counts as "yes" so
/// nothing is regenerated when nobody is there to read it.
pub fn read_yes_no<R: BufRead>(reader: &mut R, question: &str) -> io::Result<bool> {
    loop {
        print!("{}  ", question.bright_magenta());
        io::stdout().flush()?;

        let mut input = String::new();
        if reader.read_line(&mut input)? == 0 {
            println!();
            return Ok(true);
        }

        match parse_answer(&input) {
            Some(answer) => return Ok(answer),
            None => println!("   {}", "Please answer y or n.".dimmed()),
        }
    }
}
