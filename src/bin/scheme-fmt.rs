use anyhow::Result;
use clap::Parser;

use scheme_language_server::cli::{run, summary, FmtArgs};

fn main() -> Result<()> {
    let args = FmtArgs::parse();
    let reformatted = run(&args)?;
    eprintln!("{}", summary(args.files.len(), reformatted));
    Ok(())
}
