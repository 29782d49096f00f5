//! Command surface
//!
//! Maps tokenized input lines onto engine operations and renders every
//! outcome, errors included, as plain text. Nothing here terminates the
//! process; `exit`/`quit` just tell the caller to stop reading.

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::fs;
use std::io;

use crate::shell::engine::Framework;
use crate::ui::help;

/// Outcome of dispatching one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Dispatch one tokenized command line
pub fn dispatch(fw: &mut Framework, tokens: &[String]) -> Outcome {
    let Some((verb, args)) = tokens.split_first() else {
        return Outcome::Continue;
    };
    match verb.as_str() {
        "help" => help::print_help(),
        "show" => cmd_show(fw, args),
        "use" => cmd_use(fw, args),
        "options" => cmd_options(fw),
        "set" => cmd_set(fw, args),
        "run" => cmd_run(fw),
        "back" => cmd_back(fw),
        "scan" => cmd_scan(fw),
        "search" => cmd_search(fw, args),
        "banner" => cmd_banner(fw, args),
        "cd" => cmd_cd(args),
        "ls" => cmd_ls(),
        "clear" => cmd_clear(),
        "exit" | "quit" => return Outcome::Exit,
        _ => println!("Unknown command"),
    }
    Outcome::Continue
}

fn cmd_show(fw: &Framework, args: &[String]) {
    if args.first().map(String::as_str) != Some("modules") {
        println!("Usage: show modules");
        return;
    }
    println!("Available modules:");
    for (key, meta) in fw.registry().entries() {
        println!("  {:40} {}", key, describe(&meta.description));
    }
}

fn cmd_use(fw: &mut Framework, args: &[String]) {
    let Some(name) = args.first() else {
        println!("Usage: use <module>");
        return;
    };
    match fw.use_module(name) {
        Ok(key) => println!("Loaded module {}", key),
        Err(e) => println!("{}", e),
    }
}

fn cmd_options(fw: &Framework) {
    let Some(session) = fw.session() else {
        println!("No module loaded.");
        return;
    };
    println!("Options for {}:", session.key());
    println!("  {:<12} {:<10} {:<10} {}", "Name", "Current", "Required", "Description");
    for opt in session.options() {
        println!(
            "  {:<12} {:<10} {:<10} {}",
            opt.name,
            opt.value.as_deref().unwrap_or(""),
            if opt.required { "yes" } else { "no" },
            opt.description,
        );
    }
}

fn cmd_set(fw: &mut Framework, args: &[String]) {
    let Some(session) = fw.session_mut() else {
        println!("No module loaded.");
        return;
    };
    if args.len() < 2 {
        println!("Usage: set <option> <value>");
        return;
    }
    let name = &args[0];
    let value = args[1..].join(" ");
    match session.set_option(name, &value) {
        Ok(()) => println!("{} => {}", name, value),
        Err(e) => println!("{}", e),
    }
}

fn cmd_run(fw: &mut Framework) {
    if fw.session().is_none() {
        println!("No module loaded.");
        return;
    }
    if let Err(e) = fw.run_current() {
        println!("{}", e);
    }
}

fn cmd_back(fw: &mut Framework) {
    match fw.unload() {
        Some(key) => println!("Unloaded {}", key),
        None => println!("No module loaded."),
    }
}

fn cmd_scan(fw: &mut Framework) {
    let count = fw.rescan();
    println!("Scanned {} modules.", count);
}

fn cmd_search(fw: &Framework, args: &[String]) {
    let Some(keyword) = args.first() else {
        println!("Usage: search <keyword>");
        return;
    };
    for (key, description) in fw.search(keyword) {
        println!("{} - {}", key, describe(&description));
    }
}

fn cmd_banner(fw: &mut Framework, args: &[String]) {
    match args.first().map(String::as_str) {
        Some("reload") => {
            fw.banners_mut().reload();
            println!("{}", fw.banners().random());
        }
        Some("list") => {
            for name in fw.banners().list() {
                println!("  {}", name);
            }
        }
        _ => println!("Usage: banner reload|list"),
    }
}

fn cmd_cd(args: &[String]) {
    let Some(dir) = args.first() else {
        return;
    };
    match std::env::set_current_dir(dir) {
        Ok(()) => match std::env::current_dir() {
            Ok(cwd) => println!("Changed Directory to: {}", cwd.display()),
            Err(e) => println!("Error: {}", e),
        },
        Err(e) => println!("Error: {}", e),
    }
}

fn cmd_ls() {
    let entries = match fs::read_dir(".") {
        Ok(entries) => entries,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    for entry in entries.filter_map(|e| e.ok()) {
        println!("  {}", entry.file_name().to_string_lossy());
    }
}

fn cmd_clear() {
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

fn describe(description: &str) -> &str {
    if description.is_empty() {
        "(no description)"
    } else {
        description
    }
}
