//! Cross-modal consistency command

use super::parse_json_arg;
use crate::error::CliResult;
use crate::output::{print_field, print_heading, print_structured, OutputFormat};
use colored::Colorize;
use sentinel_guard::ScanEngines;
use sentinel_types::EmbeddingVector;

/// Compare a frame embedding with a transcript embedding
pub fn execute(
    frame: &str,
    transcript: &str,
    engines: &ScanEngines,
    format: OutputFormat,
) -> CliResult<()> {
    let frame: EmbeddingVector = parse_json_arg("frame", frame)?;
    let transcript: EmbeddingVector = parse_json_arg("transcript", transcript)?;

    let verdict = engines.cross_modal.scan_cross_modal(&frame, &transcript)?;

    if print_structured(&verdict, format)? {
        return Ok(());
    }

    print_heading("Cross-Modal Check");
    let decision = if verdict.is_mismatch() {
        "MISMATCH".red().bold()
    } else {
        "MATCH".green().bold()
    };
    print_field("Decision", decision);
    print_field("Similarity", format!("{:.4}", verdict.score));
    print_field(
        "Threshold",
        format!("{:.4}", engines.cross_modal.scorer().threshold()),
    );
    print_field("Dimensions", frame.dimension());
    Ok(())
}
