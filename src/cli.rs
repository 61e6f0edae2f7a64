//! Command-line driver for the scheme-fmt binary.
//!
//! Formats files in place, or stdin to stdout when given `-`, and reports
//! which files changed on stderr.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::fmt::{format_source, FormatOptions};

/// Command-line arguments for the scheme-fmt binary
#[derive(Debug, Parser)]
#[command(name = "scheme-fmt")]
#[command(about = "Formats Scheme source files")]
#[command(version)]
pub struct FmtArgs {
    /// Indent with tabs or spaces
    #[arg(long, value_enum, default_value = "spaces")]
    pub indent_with: IndentWith,

    /// Number of spaces per indent level
    #[arg(long, default_value_t = 2)]
    pub indent_size: usize,

    /// Files to format in place; `-` reads stdin and writes stdout
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum IndentWith {
    Tabs,
    Spaces,
}

impl FmtArgs {
    pub fn format_options(&self) -> FormatOptions {
        match self.indent_with {
            IndentWith::Tabs => FormatOptions::tabs(),
            IndentWith::Spaces => FormatOptions::spaces(self.indent_size),
        }
    }
}

/// Format every file, rewriting changed ones in place.
///
/// Returns how many files were reformatted. Already-formatted files are
/// left untouched on disk; stdin input is always echoed (formatted) to
/// stdout.
pub fn run(args: &FmtArgs) -> Result<usize> {
    let options = args.format_options();
    let mut reformatted = 0;

    for path in &args.files {
        if path.as_os_str() == "-" {
            if format_stdin(&options)? {
                eprintln!("reformatted stdin");
                reformatted += 1;
            }
            continue;
        }

        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let result = format_source(&source, &options)
            .with_context(|| format!("failed to format {}", path.display()))?;

        if result == source {
            continue;
        }

        fs::write(path, &result).with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("reformatted {}", path.display());
        reformatted += 1;
    }

    Ok(reformatted)
}

/// Format stdin to stdout, reporting whether anything changed.
fn format_stdin(options: &FormatOptions) -> Result<bool> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;

    let result = format_source(&source, options)?;

    let mut stdout = std::io::stdout();
    stdout
        .write_all(result.as_bytes())
        .context("failed to write stdout")?;
    stdout.flush().context("failed to flush stdout")?;

    Ok(result != source)
}

/// One-line run summary for stderr.
pub fn summary(total: usize, reformatted: usize) -> String {
    fn files(n: usize) -> &'static str {
        if n == 1 {
            "file"
        } else {
            "files"
        }
    }

    let unchanged = total - reformatted;
    match (reformatted, unchanged) {
        (0, u) => format!("{} {} left unchanged", u, files(u)),
        (r, 0) => format!("{} {} reformatted", r, files(r)),
        (r, u) => format!(
            "{} {} reformatted, {} {} left unchanged",
            r,
            files(r),
            u,
            files(u)
        ),
    }
}
