use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::bridge::ExternalFormatter;
use crate::config::Settings;
use crate::lsp::backend::Backend;

/// Configuration section requested from the client.
const SETTINGS_SECTION: &str = "scheme";

/// Trait for handling range formatting requests
#[tower_lsp::async_trait]
pub trait HandleRangeFormatting {
    async fn handle_range_formatting(
        &self,
        params: DocumentRangeFormattingParams,
    ) -> LspResult<Option<Vec<TextEdit>>>;
    async fn formatter_command(&self) -> String;
}

#[tower_lsp::async_trait]
impl HandleRangeFormatting for Backend {
    async fn handle_range_formatting(
        &self,
        params: DocumentRangeFormattingParams,
    ) -> LspResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let range = params.range;

        let text = {
            let docs = self.documents.lock().await;
            match docs.get(&uri) {
                Some(state) => state.slice(range).to_string(),
                None => return Ok(None),
            }
        };

        let command = self.formatter_command().await;
        let formatter = ExternalFormatter::new(command, self.config.script_path.clone());

        log::debug!(
            "formatting {} bytes of {} via `{}`",
            text.len(),
            uri,
            formatter.describe()
        );

        // The bridge blocks on the child process; keep it off the executor.
        let outcome = tokio::task::spawn_blocking(move || formatter.format(&text)).await;

        match outcome {
            Ok(Ok(formatted)) => Ok(Some(vec![TextEdit {
                range,
                new_text: formatted,
            }])),
            Ok(Err(err)) => {
                log::warn!("range formatting failed: {err:#}");
                self.client
                    .show_message(MessageType::ERROR, format!("scheme-fmt failed: {err:#}"))
                    .await;
                Ok(None)
            }
            Err(err) => {
                self.client
                    .show_message(
                        MessageType::ERROR,
                        format!("scheme-fmt task failed: {err}"),
                    )
                    .await;
                Ok(None)
            }
        }
    }

    /// Formatter executable for the next invocation.
    ///
    /// Asked of the client anew on every request (never cached), falling
    /// back to the command from the server's own configuration when the
    /// client has no answer.
    async fn formatter_command(&self) -> String {
        let items = vec![ConfigurationItem {
            scope_uri: None,
            section: Some(SETTINGS_SECTION.to_string()),
        }];

        let value = match self.client.configuration(items).await {
            Ok(values) => values.into_iter().next(),
            Err(err) => {
                log::debug!("workspace/configuration unavailable: {err}");
                None
            }
        };

        value
            .and_then(|v| serde_json::from_value::<Settings>(v).ok())
            .and_then(|settings| settings.formatter_command)
            .filter(|command| !command.is_empty())
            .unwrap_or_else(|| self.config.formatter_command.clone())
    }
}
