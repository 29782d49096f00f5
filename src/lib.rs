//! Lazy Framework - modular interactive command shell
//!
//! A small console shell that discovers pluggable script modules from a
//! directory tree, lets a user load one, configure its options, and execute
//! it against a shared session context.
//!
//! ## Design Principles
//!
//! 1. **Scripted extensibility**: modules are Rhai scripts behind a fixed
//!    `OPTIONS`/`run(session, options)` contract; adding a module means
//!    dropping a file into a scanned root
//! 2. **Static listing, dynamic loading**: the registry lists modules from
//!    shallow text inspection alone; code only executes on `use`
//! 3. **Single synchronous engine**: one command runs to completion before
//!    the next is read; at most one module session exists at a time
//! 4. **Degrade, never crash**: unreadable files are skipped, metadata
//!    extraction failures yield empty metadata, and command errors render
//!    as one-line messages

pub mod config;
pub mod logging;
pub mod module;
pub mod shell;
pub mod starter;
pub mod ui;

// Re-export the types most callers need
pub use config::{RootConfig, ShellConfig};
pub use module::{
    LoadedModuleSession, ModuleError, ModuleMetadata, ModuleRegistry, ModuleRoot, OptionSpec,
    OptionsSchema, ResolvedOption, SearchIndex, SessionContext,
};
pub use shell::{Framework, SessionState};
