//! Terminal presentation: banner rendering, the startup marquee, and
//! width-responsive help. None of this touches engine state.

pub mod banner;
pub mod help;
pub mod marquee;

pub use banner::BannerPool;
pub use marquee::Marquee;

/// Current terminal width in columns, with an 80-column fallback
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80)
}
