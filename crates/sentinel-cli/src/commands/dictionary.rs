//! Threat dictionary command

use crate::error::CliResult;
use crate::output::{print_heading, print_structured, OutputFormat};
use colored::Colorize;
use sentinel_guard::ScanEngines;

/// Show the loaded dictionary; loading it is the validation
pub fn execute(engines: &ScanEngines, format: OutputFormat) -> CliResult<()> {
    let dictionary = engines.injection.dictionary();
    let block_threshold = engines.injection.matcher().config().block_threshold;

    let data = serde_json::json!({
        "count": dictionary.len(),
        "block_threshold": block_threshold,
        "entries": dictionary.entries(),
    });
    if print_structured(&data, format)? {
        return Ok(());
    }

    print_heading("Threat Dictionary");
    for entry in dictionary.entries() {
        let marker = if entry.weight >= block_threshold {
            "●".red()
        } else {
            "●".yellow()
        };
        println!("  {} {:<32} {:.2}", marker, entry.phrase, entry.weight);
    }
    println!();
    println!(
        "  {} {} phrases, block threshold {:.2}",
        "✓".green(),
        dictionary.len(),
        block_threshold
    );
    Ok(())
}
