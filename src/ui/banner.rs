//! Banner pool
//!
//! Loads banner art from text files in a directory, picks one at random,
//! fits it to the terminal width, and colorizes it. An empty or unreadable
//! banner directory falls back to a built-in one-liner.

use colored::{Color, Colorize};
use rand::seq::SliceRandom;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::ui::terminal_width;

const FALLBACK_BANNER: &str = "Lazy Framework";

const BANNER_COLORS: &[Color] = &[
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Pool of banner texts loaded from `*.txt` files
pub struct BannerPool {
    dir: PathBuf,
    banners: Vec<String>,
}

impl BannerPool {
    /// Create a pool over `dir` and load it immediately
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let mut pool = Self {
            dir: dir.into(),
            banners: Vec::new(),
        };
        pool.reload();
        pool
    }

    /// Re-read all banner files, sorted by name
    ///
    /// Unreadable files are skipped; an empty result falls back to the
    /// built-in banner so `random()` always has something to show.
    pub fn reload(&mut self) {
        self.banners.clear();
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Failed to create banner directory {:?}: {}", self.dir, e);
        }
        for path in self.banner_files() {
            match fs::read_to_string(&path) {
                Ok(text) => {
                    let text = text.trim_end().to_string();
                    if !text.is_empty() {
                        self.banners.push(text);
                    }
                }
                Err(e) => debug!("Skipping banner {:?}: {}", path, e),
            }
        }
        if self.banners.is_empty() {
            self.banners.push(FALLBACK_BANNER.to_string());
        }
    }

    /// Banner file names currently on disk
    pub fn list(&self) -> Vec<String> {
        self.banner_files()
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect()
    }

    /// A random banner, fitted to the terminal width and colorized
    pub fn random(&self) -> String {
        let mut rng = rand::thread_rng();
        let banner = self
            .banners
            .choose(&mut rng)
            .map(|s| s.as_str())
            .unwrap_or(FALLBACK_BANNER);
        let fitted = fit_to_width(banner, terminal_width());
        let color = BANNER_COLORS.choose(&mut rng).copied().unwrap_or(Color::Green);
        format!("{}\n", fitted.color(color))
    }

    fn banner_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "txt").unwrap_or(false))
            .collect();
        files.sort();
        files
    }
}

/// Truncate each line when the terminal is narrower than the banner,
/// center each line when it is wider
fn fit_to_width(banner: &str, cols: usize) -> String {
    let lines: Vec<&str> = banner.lines().collect();
    let max_len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let fitted: Vec<String> = if max_len > cols {
        lines
            .iter()
            .map(|l| l.chars().take(cols).collect())
            .collect()
    } else {
        lines.iter().map(|l| format!("{:^cols$}", l)).collect()
    };
    fitted.join("\n")
}
