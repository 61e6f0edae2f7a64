//! External formatter bridge.
//!
//! Runs the configured interpreter on the formatting script as
//! `<command> <script> -`, feeding the text to format on stdin and reading
//! the replacement from stdout. One child process per call, always reaped,
//! no retry and no timeout.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};

/// Trailing argument telling the script to read stdin and write stdout.
const STDIN_ARG: &str = "-";

/// One-shot invoker for the external formatting script.
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    command: String,
    script: PathBuf,
}

impl ExternalFormatter {
    pub fn new(command: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            script: script.into(),
        }
    }

    /// Command line this formatter runs, for logs and error messages.
    pub fn describe(&self) -> String {
        format!("{} {} {}", self.command, self.script.display(), STDIN_ARG)
    }

    /// Pipe `input` through the external script, blocking until it exits.
    ///
    /// Returns the child's stdout verbatim when it exits zero. Spawn
    /// failures, I/O errors, non-zero exits, and non-UTF-8 output are all
    /// reported as errors; the child never outlives the call.
    ///
    /// Stdin is written in full before stdout is drained, so the script
    /// must consume its whole input before producing output (the bundled
    /// script does). A script that streams large outputs while stdin is
    /// still being written can deadlock on pipe capacity, just as a hung
    /// script blocks the call indefinitely.
    pub fn format(&self, input: &str) -> Result<String> {
        let mut child = Command::new(&self.command)
            .arg(&self.script)
            .arg(STDIN_ARG)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.describe()))?;

        let written = child
            .stdin
            .as_mut()
            .ok_or_else(|| anyhow!("no stdin pipe for `{}`", self.command))
            .and_then(|stdin| {
                stdin
                    .write_all(input.as_bytes())
                    .with_context(|| format!("failed to write to `{}`", self.command))
            });
        if let Err(err) = written {
            // Don't leave the child running on an early return.
            let _ = child.kill();
            let _ = child.wait();
            return Err(err);
        }

        // Closes stdin, collects both pipes, and reaps the child.
        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to collect output of `{}`", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("`{}` failed with {}", self.describe(), output.status);
            }
            bail!(
                "`{}` failed with {}: {}",
                self.describe(),
                output.status,
                stderr
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("`{}` produced non-UTF-8 output", self.describe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    /// Write a shell script into `dir` and return a formatter running it.
    fn script_formatter(dir: &Path, body: &str) -> ExternalFormatter {
        let script = dir.join("fake-fmt.sh");
        fs::write(&script, body).expect("write script");
        ExternalFormatter::new("sh", &script)
    }

    #[test]
    fn stdin_is_passed_through_unmodified() {
        let dir = tempfile::tempdir().expect("tempdir");
        let formatter = script_formatter(dir.path(), "cat\n");

        let input = "(define(f x)(+ x 1))";
        let output = formatter.format(input).expect("format should succeed");
        assert_eq!(output, input);
    }

    #[test]
    fn stdout_is_taken_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Ignore stdin, emit a fixed replacement with no trailing newline.
        let formatter = script_formatter(
            dir.path(),
            "cat >/dev/null\nprintf '(define (f x)\\n  (+ x 1))'\n",
        );

        let output = formatter.format("(define(f x)(+ x 1))").unwrap();
        assert_eq!(output, "(define (f x)\n  (+ x 1))");
    }

    #[test]
    fn script_receives_only_the_stdin_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let formatter = script_formatter(dir.path(), "cat >/dev/null\nprintf '%s,' \"$@\"\n");

        let output = formatter.format("ignored").unwrap();
        assert_eq!(output, "-,");
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let formatter = script_formatter(dir.path(), "echo 'boom' >&2\nexit 3\n");

        let err = formatter.format("(a)").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed"), "unexpected error: {message}");
        assert!(message.contains("boom"), "stderr missing: {message}");
    }

    #[test]
    fn missing_executable_is_an_error() {
        let formatter = ExternalFormatter::new("/nonexistent/interpreter", "scheme-fmt.py");

        let err = formatter.format("(a)").unwrap_err();
        assert!(format!("{err:#}").contains("failed to spawn"));
    }
}
