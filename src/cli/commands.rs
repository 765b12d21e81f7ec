//! Command dispatch: wire settings and services, run the pipeline

use std::collections::BTreeSet;
use std::sync::Arc;

use colored::Colorize;
use tracing::debug;

use crate::application::GenerateService;
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::domain::Finger;
use crate::infrastructure::traits::RealCommandRunner;

/// Run the generation pipeline for the parsed CLI arguments.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Arc::new(Settings::load()?);
    debug!("execute_command: settings={:?}", settings);
    let tool = settings.flatten_tool.clone();

    // Duplicates collapse; order of the labels is irrelevant.
    let exclude: BTreeSet<Finger> = cli.exclude.iter().copied().collect();
    if exclude.is_empty() {
        println!("No fingers excluded.");
    } else {
        let labels: Vec<String> = exclude.iter().map(|f| f.to_string()).collect();
        println!("Excluding fingers: {}", labels.join(", "));
    }

    let service = GenerateService::new(Arc::new(RealCommandRunner), settings);
    let report = service.generate(&cli.input, &cli.output, &exclude)?;

    if report.removed > 0 {
        println!("Removed {} excluded module subtrees.", report.removed);
    }
    println!("{}", format!("Wrote {}", cli.output.display()).green());
    if !report.tool_stdout.trim().is_empty() {
        println!("--- {} stdout ---", tool);
        print!("{}", report.tool_stdout);
    }
    Ok(())
}
