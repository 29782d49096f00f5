//! Shell configuration
//!
//! Loaded from an optional TOML file; every field has a default so a
//! missing file simply means defaults. Nothing here persists module
//! option values between runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::module::registry::ModuleRoot;

/// One module root directory and the namespace its keys live under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootConfig {
    /// Directory to scan (relative paths resolve against the base dir)
    pub dir: String,
    /// Key prefix, e.g. `modules` in `modules/recon/sysinfo.rhai`
    pub namespace: String,
}

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Module roots scanned in order; order also drives `use` suffix
    /// resolution
    #[serde(default = "default_module_roots")]
    pub module_roots: Vec<RootConfig>,

    /// Directory holding banner text files
    #[serde(default = "default_banner_dir")]
    pub banner_dir: String,

    /// How many leading lines of a module file metadata extraction reads
    #[serde(default = "default_metadata_read_lines")]
    pub metadata_read_lines: usize,

    /// Show the one-line startup animation
    #[serde(default = "default_true")]
    pub marquee: bool,

    /// Log filter used when RUST_LOG is not set
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_module_roots() -> Vec<RootConfig> {
    vec![
        RootConfig {
            dir: "modules".to_string(),
            namespace: "modules".to_string(),
        },
        RootConfig {
            dir: "examples".to_string(),
            namespace: "examples".to_string(),
        },
    ]
}

fn default_banner_dir() -> String {
    "banner".to_string()
}

fn default_metadata_read_lines() -> usize {
    crate::module::registry::metadata::METADATA_READ_LINES
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            module_roots: default_module_roots(),
            banner_dir: default_banner_dir(),
            metadata_read_lines: default_metadata_read_lines(),
            marquee: true,
            log_filter: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config TOML: {0}")]
    Parse(String),

    #[error("Duplicate module root namespace: {0}")]
    DuplicateNamespace(String),
}

impl ShellConfig {
    /// Load configuration from `path`, or defaults when the file is absent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations whose roots share a namespace; distinct
    /// namespaces keep registry keys collision-free across roots.
    fn validate(&self) -> Result<(), ConfigError> {
        for (i, root) in self.module_roots.iter().enumerate() {
            if self.module_roots[..i]
                .iter()
                .any(|r| r.namespace == root.namespace)
            {
                return Err(ConfigError::DuplicateNamespace(root.namespace.clone()));
            }
        }
        Ok(())
    }

    /// Module roots with directories resolved against `base_dir`
    pub fn resolved_roots(&self, base_dir: &Path) -> Vec<ModuleRoot> {
        self.module_roots
            .iter()
            .map(|r| ModuleRoot::new(resolve(base_dir, &r.dir), &r.namespace))
            .collect()
    }

    /// Banner directory resolved against `base_dir`
    pub fn resolved_banner_dir(&self, base_dir: &Path) -> PathBuf {
        resolve(base_dir, &self.banner_dir)
    }
}

fn resolve(base_dir: &Path, dir: &str) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = ShellConfig::load("/nonexistent/lazyfw.toml").unwrap();
        assert_eq!(config.module_roots.len(), 2);
        assert_eq!(config.module_roots[0].namespace, "modules");
        assert_eq!(config.module_roots[1].namespace, "examples");
        assert!(config.marquee);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: ShellConfig = toml::from_str(
            r#"
banner_dir = "art"
marquee = false
"#,
        )
        .unwrap();
        assert_eq!(config.banner_dir, "art");
        assert!(!config.marquee);
        assert_eq!(config.module_roots.len(), 2);
    }

    #[test]
    fn duplicate_namespaces_are_rejected() {
        let config: ShellConfig = toml::from_str(
            r#"
[[module_roots]]
dir = "a"
namespace = "modules"

[[module_roots]]
dir = "b"
namespace = "modules"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateNamespace(_))
        ));
    }

    #[test]
    fn relative_roots_resolve_against_base_dir() {
        let config = ShellConfig::default();
        let roots = config.resolved_roots(Path::new("/opt/lzf"));
        assert_eq!(roots[0].dir, Path::new("/opt/lzf/modules"));
        assert_eq!(roots[1].dir, Path::new("/opt/lzf/examples"));
    }
}
