use crate::cmd::CheckArgs;
use crate::config::Config;
use crate::utils::{print_json, read_document};
use anyhow::{Context, Result};
use bgr_markup::check_documents;
use bgr_types::{line_count, Diagnostic};
use tracing::trace;

pub async fn run_check_command(args: CheckArgs) -> Result<()> {
    trace!("running check command with args: {args:?}");

    let config = Config::load(args.config.as_deref()).await?;
    let options = config
        .check_options(args.profile, args.fuzzy)
        .context("failed to build check options")?;

    let source = read_document(args.source.as_str()).await?;
    let target = read_document(args.target.as_str()).await?;

    let report = check_documents(source.as_str(), target.as_str(), &options);

    if args.json {
        return print_json(&report);
    }

    print_diagnostics("source", line_count(source.as_str()), &report.source);
    print_diagnostics("target", line_count(target.as_str()), &report.target);
    if report.is_clean() {
        println!("no problems found");
    }

    Ok(())
}

fn print_diagnostics(name: &str, lines: usize, diagnostics: &[Diagnostic]) {
    println!("{name} ({lines} lines): {} problems", diagnostics.len());
    for diagnostic in diagnostics {
        println!("  {diagnostic}");
    }
}
