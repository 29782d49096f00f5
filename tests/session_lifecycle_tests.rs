//! Session lifecycle: use, set, options, run, back

mod shell_common;

use lazyfw::ModuleError;
use shell_common::ShellFixture;

const ECHO: &str = r#"
const MODULE_INFO = #{ name: "aux/echo", description: "Echo string back (safe)" };
const OPTIONS = #{
    "MSG": #{ required: true, default: "", description: "Message to echo" },
};
fn run(session, options) {
    print(`ECHO: ${options["MSG"]}`);
}
"#;

const BROKEN: &str = "fn run(session, options { this does not parse";

#[test]
fn use_unknown_key_reports_not_found() {
    let fixture = ShellFixture::new().unwrap();
    let mut fw = fixture.framework();
    let err = fw.use_module("no/such.rhai").unwrap_err();
    assert!(matches!(err, ModuleError::ModuleNotFound(_)));
    assert!(fw.current_key().is_none());
}

#[test]
fn failed_load_of_broken_module_preserves_prior_session() {
    let fixture = ShellFixture::new().unwrap();
    fixture
        .write_module(&fixture.examples_dir, "aux/echo.rhai", ECHO)
        .unwrap();
    fixture
        .write_module(&fixture.modules_dir, "broken.rhai", BROKEN)
        .unwrap();

    let mut fw = fixture.framework();
    fw.use_module("aux/echo.rhai").unwrap();
    fw.session_mut().unwrap().set_option("MSG", "survivor").unwrap();

    let err = fw.use_module("broken.rhai").unwrap_err();
    assert!(matches!(err, ModuleError::LoadError(_)));
    assert_eq!(fw.current_key(), Some("examples/aux/echo.rhai"));
    assert_eq!(
        fw.session().unwrap().options()[0].value.as_deref(),
        Some("survivor")
    );
}

#[test]
fn set_on_undeclared_option_fails_and_store_is_unchanged() {
    let fixture = ShellFixture::new().unwrap();
    fixture
        .write_module(&fixture.examples_dir, "aux/echo.rhai", ECHO)
        .unwrap();

    let mut fw = fixture.framework();
    fw.use_module("aux/echo.rhai").unwrap();

    let err = fw
        .session_mut()
        .unwrap()
        .set_option("RHOST", "10.0.0.1")
        .unwrap_err();
    assert!(matches!(err, ModuleError::UnknownOption(_)));

    let options = fw.session().unwrap().options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].name, "MSG");
    assert_eq!(options[0].value.as_deref(), Some(""));
}

#[test]
fn switching_modules_discards_overrides() {
    let fixture = ShellFixture::new().unwrap();
    fixture
        .write_module(&fixture.examples_dir, "aux/echo.rhai", ECHO)
        .unwrap();
    fixture
        .write_module(&fixture.modules_dir, "other.rhai", ECHO)
        .unwrap();

    let mut fw = fixture.framework();
    fw.use_module("aux/echo.rhai").unwrap();
    fw.session_mut().unwrap().set_option("MSG", "gone").unwrap();

    fw.use_module("other.rhai").unwrap();
    assert_eq!(fw.current_key(), Some("modules/other.rhai"));
    assert_eq!(fw.session().unwrap().options()[0].value.as_deref(), Some(""));
}

#[test]
fn failed_run_leaves_module_loaded() {
    let fixture = ShellFixture::new().unwrap();
    fixture
        .write_module(
            &fixture.examples_dir,
            "fussy.rhai",
            r#"
const OPTIONS = #{ "MSG": #{ required: true, default: "", description: "" } };
fn run(session, options) {
    if options["MSG"] == "" { throw "MSG must be set"; }
}
"#,
        )
        .unwrap();

    let mut fw = fixture.framework();
    fw.use_module("fussy.rhai").unwrap();

    let err = fw.run_current().unwrap_err();
    assert!(matches!(err, ModuleError::RunError(_)));
    assert_eq!(fw.current_key(), Some("examples/fussy.rhai"));

    fw.session_mut().unwrap().set_option("MSG", "ok").unwrap();
    fw.run_current().unwrap();
}
