//! One-line startup marquee
//!
//! Progressive text reveal with a spinner, running on a background thread.
//! Purely cosmetic: it never touches engine state, and the shell waits for
//! it (or stops it) before reading input.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Handle to a running marquee animation
pub struct Marquee {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Marquee {
    /// Start animating `text` with default timings
    pub fn start(text: &str) -> Self {
        Self::with_timings(text, Duration::from_millis(60), Duration::from_millis(60))
    }

    /// Start animating `text`, revealing one character per `reveal` and
    /// ticking the spinner every `tick`
    pub fn with_timings(text: &str, reveal: Duration, tick: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let text = text.to_string();
        let handle = thread::spawn(move || animate(&text, reveal, tick, &stop_flag));
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Block until the animation finishes on its own
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Interrupt the animation and block until the thread exits
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn animate(text: &str, reveal: Duration, tick: Duration, stop: &AtomicBool) {
    let chars: Vec<char> = text.chars().collect();
    let alt: Vec<char> = chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i % 2 == 0 {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect();

    let mut pos = 0usize;
    let mut spin = SPINNER.iter().cycle();
    let mut last = Instant::now();
    let mut stdout = io::stdout();

    while !stop.load(Ordering::Relaxed) {
        if pos < chars.len() && last.elapsed() >= reveal {
            pos += 1;
            last = Instant::now();
        }
        let composed: String = alt[..pos].iter().chain(chars[pos..].iter()).collect();
        let spinner = spin.next().copied().unwrap_or('|');
        let _ = write!(stdout, "\r{} [{}]", composed, spinner);
        let _ = stdout.flush();
        if pos >= chars.len() {
            break;
        }
        thread::sleep(tick);
    }
    let _ = writeln!(stdout, "\r{}    ", text);
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marquee_finishes_on_its_own() {
        let marquee = Marquee::with_timings(
            "hi",
            Duration::from_millis(1),
            Duration::from_millis(1),
        );
        marquee.wait();
    }

    #[test]
    fn marquee_can_be_interrupted() {
        let marquee = Marquee::with_timings(
            "a much longer marquee text",
            Duration::from_millis(50),
            Duration::from_millis(10),
        );
        marquee.stop();
    }
}
