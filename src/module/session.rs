//! Loaded-module session
//!
//! Wraps a loaded module with its per-session option overrides and mediates
//! all option/run interaction. Dropping the session (via `back` or a
//! subsequent `use`) discards the overrides; nothing persists.

use std::collections::HashMap;
use tracing::debug;

use crate::module::loader::LoadedModule;
use crate::module::traits::{ModuleError, ResolvedOption, SessionContext};

/// One loaded module plus its mutable option-value store
pub struct LoadedModuleSession {
    module: LoadedModule,
    values: HashMap<String, String>,
}

impl LoadedModuleSession {
    /// Wrap a freshly loaded module with an empty option store
    pub fn new(module: LoadedModule) -> Self {
        Self {
            module,
            values: HashMap::new(),
        }
    }

    /// Registry key of the wrapped module
    pub fn key(&self) -> &str {
        self.module.key()
    }

    /// Set an option override
    ///
    /// Fails with [`ModuleError::UnknownOption`] when the module's schema
    /// does not declare `name`; the store is left untouched in that case.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ModuleError> {
        if !self.module.schema().contains(name) {
            return Err(ModuleError::UnknownOption(name.to_string()));
        }
        debug!("{}: {} => {}", self.key(), name, value);
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// All options with effective values, in schema declaration order
    ///
    /// The effective value is the session override when set, else the
    /// schema default, else nothing.
    pub fn options(&self) -> Vec<ResolvedOption> {
        self.module
            .schema()
            .iter()
            .map(|(name, spec)| ResolvedOption {
                name: name.to_string(),
                value: self
                    .values
                    .get(name)
                    .cloned()
                    .or_else(|| spec.default.clone()),
                required: spec.required,
                default: spec.default.clone(),
                description: spec.description.clone(),
            })
            .collect()
    }

    /// Execute the module's run entry point with resolved option values
    ///
    /// Only options that resolve to a value appear in the map handed to the
    /// script. A failed run leaves the session loaded and its overrides
    /// intact.
    pub fn run(&mut self, ctx: &SessionContext) -> Result<(), ModuleError> {
        let resolved: Vec<(String, String)> = self
            .options()
            .into_iter()
            .filter_map(|opt| opt.value.map(|v| (opt.name, v)))
            .collect();
        self.module.run(ctx, &resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::loader::ModuleLoader;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn session_for(source: &str) -> LoadedModuleSession {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(source.as_bytes()).unwrap();
        LoadedModuleSession::new(ModuleLoader::load("test/module.rhai", file.path()).unwrap())
    }

    const ECHO: &str = r#"
const OPTIONS = #{
    "MSG": #{ required: true, default: "", description: "Message to echo" },
    "PREFIX": #{ required: false, description: "Optional prefix" },
};
fn run(session, options) {
    if options["MSG"] == () { throw "MSG missing from resolved options"; }
}
"#;

    #[test]
    fn unknown_option_is_rejected_and_store_unchanged() {
        let mut session = session_for(ECHO);
        let err = session.set_option("NOPE", "x").unwrap_err();
        assert!(matches!(err, ModuleError::UnknownOption(_)));
        assert!(session.options().iter().all(|o| o.name != "NOPE"));
        // MSG still resolves to its schema default
        assert_eq!(session.options()[0].value.as_deref(), Some(""));
    }

    #[test]
    fn override_shadows_default_and_leaves_others_alone() {
        let mut session = session_for(ECHO);
        session.set_option("MSG", "hi").unwrap();

        let options = session.options();
        assert_eq!(options[0].name, "MSG");
        assert_eq!(options[0].value.as_deref(), Some("hi"));
        assert_eq!(options[0].default.as_deref(), Some(""));
        assert_eq!(options[1].name, "PREFIX");
        assert_eq!(options[1].value, None);
    }

    #[test]
    fn options_without_value_are_absent_from_run_map() {
        let mut session = session_for(
            r#"
const OPTIONS = #{ "PREFIX": #{ required: false, description: "no default" } };
fn run(session, options) {
    if options.len() != 0 { throw "expected empty resolved map"; }
}
"#,
        );
        session.run(&SessionContext::default()).unwrap();
    }

    #[test]
    fn failed_run_keeps_session_usable() {
        let mut session = session_for(
            r#"
const OPTIONS = #{ "MSG": #{ required: true, default: "", description: "" } };
fn run(session, options) {
    if options["MSG"] == "" { throw "say something"; }
}
"#,
        );
        assert!(session.run(&SessionContext::default()).is_err());
        session.set_option("MSG", "hello").unwrap();
        session.run(&SessionContext::default()).unwrap();
    }
}
