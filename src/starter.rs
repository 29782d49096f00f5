//! Built-in starter modules
//!
//! Seeds the examples root with two small, safe modules on first start so
//! a fresh installation has something to `use`. Existing files are never
//! overwritten.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

const SYSINFO: &str = r#"const MODULE_INFO = #{ name: "recon/sysinfo", description: "Print local system info" };
const OPTIONS = #{
    "VERBOSE": #{ required: false, default: "true", description: "Verbose output" },
};
fn run(session, options) {
    print("System info:");
    print(`  User: ${session["user"]}`);
    if options["VERBOSE"] == "true" {
        print(`  Platform: ${session["platform"]}`);
    }
}
"#;

const ECHO: &str = r#"const MODULE_INFO = #{ name: "aux/echo", description: "Echo string back (safe)" };
const OPTIONS = #{
    "MSG": #{ required: true, default: "", description: "Message to echo" },
};
fn run(session, options) {
    print(`ECHO: ${options["MSG"]}`);
}
"#;

/// Starter module sources, keyed by path relative to the examples root
pub const STARTER_MODULES: &[(&str, &str)] = &[
    ("recon/sysinfo.rhai", SYSINFO),
    ("aux/echo.rhai", ECHO),
];

/// Write any missing starter modules under `examples_root`
pub fn ensure_starter_modules(examples_root: &Path) -> io::Result<()> {
    for (rel, source) in STARTER_MODULES {
        let path = examples_root.join(rel);
        if path.exists() {
            debug!("Starter module already present: {:?}", path);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, source)?;
        info!("Seeded starter module {:?}", path);
    }
    Ok(())
}
