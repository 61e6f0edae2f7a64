use anyhow::Result;
use std::fs;
use std::thread;
use std::time::Duration;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::config::default_script_path;
use crate::lsp::backend::Backend;
use crate::Config;

/// Start the LSP server
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    // Install the bundled formatting script so the default configuration
    // works out of the box.
    if config.script_is_default {
        if let Err(e) = write_embedded_script_to_disk() {
            log::warn!("Failed to write formatting script to disk: {}", e);
        }
    }

    // If running under the integration tests, exit after a short delay so the
    // test can read stdout to EOF.
    if std::env::var("SCHEME_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config.clone())).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}

/// Write the bundled scheme-fmt.py to the user config directory
fn write_embedded_script_to_disk() -> Result<()> {
    let script_path = default_script_path()?;
    if let Some(dir) = script_path.parent() {
        fs::create_dir_all(dir)?;
    }

    // Only write if file doesn't exist (don't overwrite user modifications)
    if !script_path.exists() {
        let embedded_content = include_str!("../../resources/scheme-fmt.py");
        fs::write(&script_path, embedded_content)?;
        log::info!("Created formatting script: {:?}", script_path);
    }

    Ok(())
}
