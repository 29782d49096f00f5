//! Interactive read-eval loop
//!
//! Reads lines with rustyline, splits them into tokens (quote-aware), and
//! hands them to the command dispatcher. The prompt reflects the currently
//! loaded module.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::shell::commands::{self, Outcome};
use crate::shell::engine::Framework;

/// Run the shell until `exit`, Ctrl-C, or end of input
pub fn run(fw: &mut Framework) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        let prompt = prompt_for(fw);
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&line);
        let tokens = split_tokens(&line);
        if commands::dispatch(fw, &tokens) == Outcome::Exit {
            break;
        }
    }
    Ok(())
}

fn prompt_for(fw: &Framework) -> String {
    match fw.current_key() {
        Some(key) => format!("lzf({})> ", key.white().on_red()),
        None => "lzf> ".to_string(),
    }
}

/// Split a line into tokens, honoring single and double quotes
///
/// Unterminated quotes are tolerated: the open quote runs to end of line.
pub fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split_tokens("set MSG hello world"), ["set", "MSG", "hello", "world"]);
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            split_tokens("set MSG \"hello world\""),
            ["set", "MSG", "hello world"]
        );
        assert_eq!(split_tokens("use 'aux/echo.rhai'"), ["use", "aux/echo.rhai"]);
    }

    #[test]
    fn empty_quotes_make_an_empty_token() {
        assert_eq!(split_tokens("set MSG \"\""), ["set", "MSG", ""]);
    }

    #[test]
    fn blank_line_has_no_tokens() {
        assert!(split_tokens("   ").is_empty());
    }
}
