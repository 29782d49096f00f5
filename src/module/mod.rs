//! Module system for the shell
//!
//! Everything the engine needs to discover, inspect, load, configure, and
//! execute pluggable script modules:
//!
//! - **Registry**: walks the configured roots and maintains the key ->
//!   location and key -> metadata maps
//! - **Metadata extraction**: shallow, never-fatal text inspection so every
//!   module gets listed without being executed
//! - **Loader**: compiles and runs a module file as a Rhai script behind the
//!   fixed `OPTIONS`/`run(session, options)` contract
//! - **Session**: the single current module with its option overrides
//! - **Search**: linear keyword lookup over registry metadata

pub mod loader;
pub mod registry;
pub mod search;
pub mod session;
pub mod traits;

pub use loader::{LoadedModule, ModuleLoader};
pub use registry::{ModuleRegistry, ModuleRoot};
pub use search::SearchIndex;
pub use session::LoadedModuleSession;
pub use traits::{
    ModuleError, ModuleMetadata, OptionSpec, OptionsSchema, ResolvedOption, SessionContext,
};
