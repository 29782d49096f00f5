//! Shell engine
//!
//! Owns the registry, the single optional module session, the session
//! context, and the banner pool. All state mutation happens here, one
//! command at a time; the REPL collaborator only parses lines and
//! dispatches.

use std::path::Path;
use tracing::{debug, info};

use crate::config::ShellConfig;
use crate::module::{
    LoadedModuleSession, ModuleError, ModuleLoader, ModuleRegistry, SearchIndex, SessionContext,
};
use crate::ui::BannerPool;

/// The engine's current-module state
///
/// A tagged variant instead of a nullable session: the two states and
/// their legal operations stay explicit.
pub enum SessionState {
    Unloaded,
    Loaded(LoadedModuleSession),
}

/// The shell engine
pub struct Framework {
    registry: ModuleRegistry,
    state: SessionState,
    context: SessionContext,
    banners: BannerPool,
}

impl Framework {
    /// Build the engine from configuration and run the initial scan
    pub fn new(config: &ShellConfig, base_dir: &Path) -> Self {
        let mut registry = ModuleRegistry::new(config.resolved_roots(base_dir))
            .with_metadata_read_lines(config.metadata_read_lines);
        registry.scan();

        Self {
            registry,
            state: SessionState::Unloaded,
            context: SessionContext::from_environment(),
            banners: BannerPool::new(config.resolved_banner_dir(base_dir)),
        }
    }

    /// Resolve `name` to a key, load the module, and make it current
    ///
    /// On success any prior session is discarded (its option overrides with
    /// it) and the full key is returned. On failure the prior session is
    /// left exactly as it was.
    pub fn use_module(&mut self, name: &str) -> Result<String, ModuleError> {
        let key = self.registry.resolve(name);
        let path = self.registry.lookup(&key)?;
        let module = ModuleLoader::load(&key, path)?;
        if let SessionState::Loaded(prior) = &self.state {
            debug!("Discarding session for {}", prior.key());
        }
        self.state = SessionState::Loaded(LoadedModuleSession::new(module));
        info!("Loaded module {}", key);
        Ok(key)
    }

    /// Unload the current module, returning its key if one was loaded
    pub fn unload(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, SessionState::Unloaded) {
            SessionState::Loaded(session) => Some(session.key().to_string()),
            SessionState::Unloaded => None,
        }
    }

    /// Run the current module against the engine's session context
    pub fn run_current(&mut self) -> Result<(), ModuleError> {
        match &mut self.state {
            SessionState::Loaded(session) => session.run(&self.context),
            SessionState::Unloaded => Err(ModuleError::OperationError(
                "no module loaded".to_string(),
            )),
        }
    }

    /// Rescan all module roots; returns the number of discovered modules
    pub fn rescan(&mut self) -> usize {
        self.registry.scan()
    }

    /// Keyword search over the registry metadata
    pub fn search(&self, keyword: &str) -> Vec<(String, String)> {
        SearchIndex::new(&self.registry).search(keyword)
    }

    /// Key of the currently loaded module, if any
    pub fn current_key(&self) -> Option<&str> {
        match &self.state {
            SessionState::Loaded(session) => Some(session.key()),
            SessionState::Unloaded => None,
        }
    }

    /// Current session, if one is loaded
    pub fn session(&self) -> Option<&LoadedModuleSession> {
        match &self.state {
            SessionState::Loaded(session) => Some(session),
            SessionState::Unloaded => None,
        }
    }

    /// Current session, mutable
    pub fn session_mut(&mut self) -> Option<&mut LoadedModuleSession> {
        match &mut self.state {
            SessionState::Loaded(session) => Some(session),
            SessionState::Unloaded => None,
        }
    }

    /// The module registry
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The long-lived session context passed into module runs
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// The banner pool
    pub fn banners(&self) -> &BannerPool {
        &self.banners
    }

    /// The banner pool, mutable (for `banner reload`)
    pub fn banners_mut(&mut self) -> &mut BannerPool {
        &mut self.banners
    }
}
