//! Shallow module metadata extraction
//!
//! Reads the head of a module source file and heuristically pulls out a
//! description and the declared option names, without executing anything.
//! Extraction is best-effort by contract: any failure degrades to empty
//! metadata so the module still gets listed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::module::traits::ModuleMetadata;

/// Maximum number of leading lines inspected per file
pub const METADATA_READ_LINES: usize = 120;

/// First `description` field assignment with a quoted string value.
/// The key may be bare (Rhai map literal) or quoted.
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']?description["']?\s*:\s*["']([^"']+)["']"#).expect("static regex")
});

/// An `OPTIONS` declaration's outer brace block. Single-level scan: the
/// capture stops at the first closing brace, so nested specs may be cut
/// short. That is tolerated; this feeds listings, not execution.
static OPTIONS_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"OPTIONS\s*=\s*#?\{([^}]*)\}").expect("static regex"));

/// A quoted identifier immediately followed by a colon
static OPTION_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["']([A-Za-z0-9_]+)["']\s*:"#).expect("static regex"));

/// Extract metadata from the first `max_lines` lines of `path`
///
/// Never fails: unreadable files yield default (empty) metadata. Invalid
/// UTF-8 is decoded lossily, character by character.
pub fn extract<P: AsRef<Path>>(path: P, max_lines: usize) -> ModuleMetadata {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Metadata extraction skipped for {:?}: {}", path, e);
            return ModuleMetadata::default();
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    let head: String = text
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n");

    ModuleMetadata {
        description: extract_description(&head),
        options: extract_option_names(&head),
    }
}

fn extract_description(text: &str) -> String {
    DESCRIPTION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_option_names(text: &str) -> Vec<String> {
    let Some(block) = OPTIONS_BLOCK_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };
    dedup_names(OPTION_NAME_RE.captures_iter(block))
}

/// Every quoted-identifier-followed-by-colon occurrence in `text`, in order
/// of first appearance. Used by the loader to recover schema declaration
/// order, since Rhai object maps iterate sorted rather than as written.
pub(crate) fn scan_quoted_keys(text: &str) -> Vec<String> {
    dedup_names(OPTION_NAME_RE.captures_iter(text))
}

fn dedup_names<'a>(captures: impl Iterator<Item = regex::Captures<'a>>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in captures {
        if let Some(m) = cap.get(1) {
            let name = m.as_str();
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
