//! Shell layer: the engine state machine, the command surface, and the
//! interactive read-eval loop.

pub mod commands;
pub mod engine;
pub mod repl;

pub use commands::{dispatch, Outcome};
pub use engine::{Framework, SessionState};
