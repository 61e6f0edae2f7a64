//! Startup installation of the bundled formatting script.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const BUNDLED_SCRIPT: &str = include_str!("../resources/scheme-fmt.py");

/// Run scheme-ls to completion with its config directory inside `home`.
fn run_server_with_home(home: &Path) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_scheme-ls"))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("SCHEME_LS_TEST_EXIT", "1")
        .spawn()
        .expect("spawn language server");

    // The install happens before the server loop; waiting for the
    // test-exit shutdown is more than enough.
    child.wait().expect("server should exit on its own");
}

/// Locate the installed script anywhere under `home`, wherever the
/// platform's config directory is.
fn find_installed_script(home: &Path) -> Option<PathBuf> {
    fn walk(dir: &Path, found: &mut Option<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(&path, found);
            } else if path.file_name().is_some_and(|n| n == "scheme-fmt.py") {
                *found = Some(path);
            }
        }
    }

    let mut found = None;
    walk(home, &mut found);
    found
}

#[test]
fn startup_installs_bundled_script() {
    let home = tempfile::tempdir().expect("tempdir");

    run_server_with_home(home.path());

    let installed = find_installed_script(home.path()).expect("script should be installed");
    assert!(installed.ends_with("scheme-ls/scheme-fmt.py"));
    assert_eq!(fs::read_to_string(&installed).unwrap(), BUNDLED_SCRIPT);
}

#[test]
fn startup_does_not_overwrite_existing_script() {
    let home = tempfile::tempdir().expect("tempdir");
    let script_dir = home.path().join(".config").join("scheme-ls");
    fs::create_dir_all(&script_dir).expect("create config dir");

    let script = script_dir.join("scheme-fmt.py");
    fs::write(&script, "# user-patched formatter\n").expect("write user script");

    run_server_with_home(home.path());

    assert_eq!(
        fs::read_to_string(&script).unwrap(),
        "# user-patched formatter\n"
    );
}
