//! Module registry and discovery
//!
//! Walks the configured module roots, assigns each discovered source file a
//! namespaced key, and keeps the key -> location and key -> metadata maps in
//! lockstep. A rescan fully replaces prior state.

pub mod metadata;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::module::traits::{ModuleError, ModuleMetadata};

/// File extension a module source file must carry to be discovered
pub const MODULE_EXTENSION: &str = "rhai";

/// One directory tree scanned for modules, addressed under `namespace/`
#[derive(Debug, Clone)]
pub struct ModuleRoot {
    /// Directory to scan recursively
    pub dir: PathBuf,
    /// Key prefix for files discovered under this root
    pub namespace: String,
}

impl ModuleRoot {
    pub fn new<P: AsRef<Path>>(dir: P, namespace: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            namespace: namespace.to_string(),
        }
    }
}

/// Registry of discovered modules
///
/// Invariant: after every scan the location and metadata maps hold exactly
/// the same key set, and each key is unique within the snapshot.
#[derive(Debug)]
pub struct ModuleRegistry {
    roots: Vec<ModuleRoot>,
    locations: BTreeMap<String, PathBuf>,
    metadata: BTreeMap<String, ModuleMetadata>,
    metadata_read_lines: usize,
}

impl ModuleRegistry {
    /// Create a registry over the given roots
    pub fn new(roots: Vec<ModuleRoot>) -> Self {
        Self {
            roots,
            locations: BTreeMap::new(),
            metadata: BTreeMap::new(),
            metadata_read_lines: metadata::METADATA_READ_LINES,
        }
    }

    /// Override the per-file metadata line cap
    pub fn with_metadata_read_lines(mut self, lines: usize) -> Self {
        self.metadata_read_lines = lines;
        self
    }

    /// Rescan all roots, fully replacing prior state
    ///
    /// Unreadable directories and files are skipped with a warning; the scan
    /// itself never fails. Missing root directories are created so a fresh
    /// installation starts with empty (but scannable) roots.
    pub fn scan(&mut self) -> usize {
        self.locations.clear();
        self.metadata.clear();

        for root in &self.roots {
            if !root.dir.exists() {
                debug!("Module root does not exist, creating: {:?}", root.dir);
                if let Err(e) = fs::create_dir_all(&root.dir) {
                    warn!("Failed to create module root {:?}: {}", root.dir, e);
                    continue;
                }
            }

            let mut files = Vec::new();
            collect_module_files(&root.dir, &mut files);

            for path in files {
                let Ok(rel) = path.strip_prefix(&root.dir) else {
                    continue;
                };
                let key = format!("{}/{}", root.namespace, normalize_separators(rel));
                let meta = metadata::extract(&path, self.metadata_read_lines);
                self.locations.insert(key.clone(), path);
                self.metadata.insert(key, meta);
            }
        }

        info!("Discovered {} modules", self.locations.len());
        self.locations.len()
    }

    /// Look up the source location for a key
    pub fn lookup(&self, key: &str) -> Result<&Path, ModuleError> {
        self.locations
            .get(key)
            .map(|p| p.as_path())
            .ok_or_else(|| ModuleError::ModuleNotFound(key.to_string()))
    }

    /// Resolve a user-supplied name to a full key
    ///
    /// The name is returned as-is when it is already a known key; otherwise
    /// each configured namespace prefix is tried in root order and the first
    /// hit wins. Unknown names resolve to themselves so the subsequent
    /// lookup reports the not-found error with the user's spelling.
    pub fn resolve(&self, name: &str) -> String {
        if self.locations.contains_key(name) {
            return name.to_string();
        }
        for root in &self.roots {
            let candidate = format!("{}/{}", root.namespace, name);
            if self.locations.contains_key(&candidate) {
                return candidate;
            }
        }
        name.to_string()
    }

    /// Metadata for a key, if known
    pub fn metadata(&self, key: &str) -> Option<&ModuleMetadata> {
        self.metadata.get(key)
    }

    /// All (key, metadata) entries, sorted ascending by key
    pub fn entries(&self) -> impl Iterator<Item = (&String, &ModuleMetadata)> {
        self.metadata.iter()
    }

    /// Number of discovered modules
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no modules were discovered
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Configured roots (for suffix resolution and diagnostics)
    pub fn roots(&self) -> &[ModuleRoot] {
        &self.roots
    }
}

/// Recursively collect module source files under `dir`
///
/// Per-entry failures are logged and skipped so one unreadable file or
/// subdirectory never aborts the scan.
fn collect_module_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read directory {:?}: {}", dir, e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read directory entry in {:?}: {}", dir, e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            collect_module_files(&path, files);
        } else if path
            .extension()
            .map(|ext| ext == MODULE_EXTENSION)
            .unwrap_or(false)
        {
            files.push(path);
        }
    }
    files.sort();
}

/// Render a relative path with forward slashes regardless of platform
fn normalize_separators(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
