//! Registry scan invariants across multiple roots

mod shell_common;

use lazyfw::ModuleError;
use shell_common::ShellFixture;
use std::collections::HashSet;
use std::fs;

const PLAIN_MODULE: &str = "fn run(session, options) { }\n";

#[test]
fn every_location_has_metadata_and_keys_are_unique() {
    let fixture = ShellFixture::new().unwrap();
    fixture
        .write_module(&fixture.modules_dir, "recon/scanner.rhai", PLAIN_MODULE)
        .unwrap();
    fixture
        .write_module(&fixture.modules_dir, "aux/echo.rhai", PLAIN_MODULE)
        .unwrap();
    // Same relative path under a different root must yield a distinct key
    fixture
        .write_module(&fixture.examples_dir, "aux/echo.rhai", PLAIN_MODULE)
        .unwrap();

    let fw = fixture.framework();
    let registry = fw.registry();
    assert_eq!(registry.len(), 3);

    let mut seen = HashSet::new();
    for (key, _meta) in registry.entries() {
        assert!(seen.insert(key.clone()), "duplicate key {}", key);
        assert!(registry.lookup(key).is_ok());
        assert!(registry.metadata(key).is_some());
    }
    assert!(seen.contains("modules/aux/echo.rhai"));
    assert!(seen.contains("examples/aux/echo.rhai"));
}

#[test]
fn unreadable_files_degrade_to_empty_metadata_but_still_list() {
    let fixture = ShellFixture::new().unwrap();
    // Invalid UTF-8 bytes: extraction decodes lossily and finds nothing
    let path = fixture.modules_dir.join("binary.rhai");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let fw = fixture.framework();
    let meta = fw.registry().metadata("modules/binary.rhai").unwrap();
    assert_eq!(meta.description, "");
    assert!(meta.options.is_empty());
}

#[test]
fn rescan_reflects_added_and_deleted_files() {
    let fixture = ShellFixture::new().unwrap();
    let path = fixture
        .write_module(&fixture.modules_dir, "temp.rhai", PLAIN_MODULE)
        .unwrap();

    let mut fw = fixture.framework();
    assert_eq!(fw.registry().len(), 1);

    fs::remove_file(&path).unwrap();
    fixture
        .write_module(&fixture.examples_dir, "fresh.rhai", PLAIN_MODULE)
        .unwrap();

    assert_eq!(fw.rescan(), 1);
    assert!(matches!(
        fw.registry().lookup("modules/temp.rhai"),
        Err(ModuleError::ModuleNotFound(_))
    ));
    assert!(fw.registry().metadata("modules/temp.rhai").is_none());
    assert!(fw.registry().lookup("examples/fresh.rhai").is_ok());
}

#[test]
fn search_empty_keyword_returns_all_and_keys_find_themselves() {
    let fixture = ShellFixture::new().unwrap();
    fixture
        .write_module(
            &fixture.modules_dir,
            "recon/sysinfo.rhai",
            "const MODULE_INFO = #{ description: \"Print local system info\" };\n",
        )
        .unwrap();
    fixture
        .write_module(&fixture.examples_dir, "aux/echo.rhai", PLAIN_MODULE)
        .unwrap();

    let fw = fixture.framework();
    assert_eq!(fw.search("").len(), fw.registry().len());

    for (key, _) in fw.registry().entries() {
        let upper = key.to_uppercase();
        assert!(
            fw.search(&upper).iter().any(|(k, _)| k == key),
            "{} should find itself case-insensitively",
            key
        );
    }

    // Description matching
    let hits = fw.search("SYSTEM INFO");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, "modules/recon/sysinfo.rhai");
}
