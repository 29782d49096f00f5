//! Width-responsive help listing
//!
//! Renders the command table in two columns sized from the current
//! terminal width, wrapping descriptions instead of paginating.

use crate::ui::terminal_width;

/// Shell command reference shown by `help`
pub const COMMANDS: &[(&str, &str)] = &[
    ("show modules", "Show available modules"),
    ("use <module>", "Load a module by name"),
    ("options", "Show options for current module"),
    ("set <option> <value>", "Set module option"),
    ("run", "Run current module"),
    ("back", "Unload module"),
    ("search <keyword>", "Search modules"),
    ("scan", "Rescan modules"),
    ("banner reload|list", "Reload/list banner files"),
    ("cd <dir>", "Change working directory"),
    ("ls", "List current directory"),
    ("clear", "Clear terminal screen"),
    ("exit / quit", "Exit the program"),
];

/// Print the command table, adapted to the terminal width
pub fn print_help() {
    let width = terminal_width().max(40);
    let cmd_col = (width * 35 / 100).max(18);
    let desc_col = width.saturating_sub(cmd_col + 2).max(20);

    println!();
    println!("{:^width$}", "Core Commands");
    println!("{}", "-".repeat(width));
    for (cmd, desc) in COMMANDS {
        let wrapped = wrap(desc, desc_col);
        let mut lines = wrapped.iter();
        println!(
            "{:<cmd_col$}  {}",
            cmd,
            lines.next().map(String::as_str).unwrap_or("")
        );
        for extra in lines {
            println!("{}{}", " ".repeat(cmd_col + 2), extra);
        }
    }
    println!();
}

/// Greedy word wrap; words longer than `width` get their own line
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
