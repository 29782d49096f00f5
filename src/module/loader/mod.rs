//! Module loading
//!
//! Compiles and executes a module source file as a Rhai script, producing a
//! live [`LoadedModule`] that exposes the fixed contract: an options schema
//! (the script's `OPTIONS` constant) and a `run(session, options)` entry
//! point. Every load reads from disk and builds a fresh script engine, so a
//! re-load picks up on-disk edits; nothing is cached.

use rhai::{CallFnOptions, Dynamic, Engine, Map, Scope, AST};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::module::registry::metadata::scan_quoted_keys;
use crate::module::traits::{ModuleError, OptionSpec, OptionsSchema, SessionContext};

/// Name of the schema constant a module script may declare
pub const OPTIONS_CONSTANT: &str = "OPTIONS";

/// Name of the run entry point a module script must define
pub const RUN_ENTRY_POINT: &str = "run";

/// Module loader
///
/// Stateless: each load stands alone. Scripts execute inside the Rhai
/// engine sandbox; OS-level isolation is explicitly not provided.
pub struct ModuleLoader;

impl ModuleLoader {
    /// Load and execute the module source at `path`
    ///
    /// Fails with [`ModuleError::LoadError`] when the file cannot be read,
    /// does not parse, or raises during its own top-level execution. A
    /// missing or malformed `OPTIONS` constant yields an empty schema, not
    /// an error.
    pub fn load(key: &str, path: &Path) -> Result<LoadedModule, ModuleError> {
        info!("Loading module: {}", key);

        let source = fs::read_to_string(path)
            .map_err(|e| ModuleError::LoadError(format!("failed to read {:?}: {}", path, e)))?;

        let engine = Engine::new();
        let ast = engine
            .compile(&source)
            .map_err(|e| ModuleError::LoadError(e.to_string()))?;

        // Top-level statements run once, here; `run` invocations later reuse
        // the resulting scope without re-evaluating the script body.
        let mut scope = Scope::new();
        engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| ModuleError::LoadError(e.to_string()))?;

        let schema = schema_from_scope(&scope, &source);
        debug!("Module {} declares {} option(s)", key, schema.len());

        Ok(LoadedModule {
            key: key.to_string(),
            engine,
            ast,
            scope,
            schema,
        })
    }
}

/// A live, callable module produced by a successful load
pub struct LoadedModule {
    key: String,
    engine: Engine,
    ast: AST,
    scope: Scope<'static>,
    schema: OptionsSchema,
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("key", &self.key)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl LoadedModule {
    /// Registry key this module was loaded under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Declared options schema (immutable after load)
    pub fn schema(&self) -> &OptionsSchema {
        &self.schema
    }

    /// Invoke the module's `run` entry point
    ///
    /// The session context and resolved option values are passed as
    /// string-valued maps. The script's return value is ignored; any
    /// evaluation failure (including a missing `run` function) surfaces as
    /// [`ModuleError::RunError`].
    pub fn run(
        &mut self,
        ctx: &SessionContext,
        resolved: &[(String, String)],
    ) -> Result<(), ModuleError> {
        let mut session = Map::new();
        for (k, v) in ctx.iter() {
            session.insert(k.as_str().into(), v.clone().into());
        }
        let mut options = Map::new();
        for (k, v) in resolved {
            options.insert(k.as_str().into(), v.clone().into());
        }

        let call = CallFnOptions::new().eval_ast(false).rewind_scope(true);
        self.engine
            .call_fn_with_options::<Dynamic>(
                call,
                &mut self.scope,
                &self.ast,
                RUN_ENTRY_POINT,
                (session, options),
            )
            .map_err(|e| ModuleError::RunError(e.to_string()))?;
        Ok(())
    }
}

/// Materialize the options schema from the executed script's scope
///
/// Rhai object maps iterate in sorted key order, so declaration order is
/// recovered from the source text: names are ranked by first textual
/// appearance, with any unranked map keys appended in map order.
fn schema_from_scope(scope: &Scope, source: &str) -> OptionsSchema {
    let Some(map) = scope.get_value::<Map>(OPTIONS_CONSTANT) else {
        return OptionsSchema::default();
    };

    let ranked = scan_quoted_keys(source);
    let mut entries: Vec<(String, OptionSpec)> = Vec::with_capacity(map.len());
    for name in &ranked {
        if let Some(value) = map.get(name.as_str()) {
            entries.push((name.clone(), option_spec(value)));
        }
    }
    for (name, value) in &map {
        if !entries.iter().any(|(n, _)| n == name.as_str()) {
            entries.push((name.to_string(), option_spec(value)));
        }
    }
    OptionsSchema::from_entries(entries)
}

fn option_spec(value: &Dynamic) -> OptionSpec {
    let Some(map) = value.read_lock::<Map>() else {
        return OptionSpec::default();
    };
    OptionSpec {
        required: map
            .get("required")
            .map(|d| d.as_bool().unwrap_or_else(|_| d.to_string() == "true"))
            .unwrap_or(false),
        default: map
            .get("default")
            .filter(|d| !d.is::<()>())
            .map(dynamic_to_string),
        description: map.get("description").map(dynamic_to_string).unwrap_or_default(),
    }
}

fn dynamic_to_string(d: &Dynamic) -> String {
    d.clone().into_string().unwrap_or_else(|_| d.to_string())
}
